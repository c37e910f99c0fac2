use crate::consts;
use async_trait::async_trait;

#[derive(Clone)]
pub struct StorageHandler {
    pub client: aws_sdk_s3::Client,
}

/// Storage key for a pet photo, scoped by owner then pet.
pub fn pet_photo_key(user_id: i64, pet_id: i64, extension: &str) -> String {
    format!("pets/{user_id}/{pet_id}.{extension}")
}

#[async_trait]
impl crate::services::StorageService for StorageHandler {
    async fn save_photo(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(body);

        self.client
            .put_object()
            .bucket(consts::S3_MAIN_BUCKET_NAME)
            .key(key)
            .body(body)
            .send()
            .await?;

        Ok(())
    }

    async fn get_photo_as_bytes(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        let object = self
            .client
            .get_object()
            .bucket(consts::S3_MAIN_BUCKET_NAME)
            .key(key)
            .send()
            .await?;

        Ok(object
            .body
            .collect()
            .await
            .map(|package| package.into_bytes())?
            .into_iter()
            .collect::<Vec<u8>>())
    }
}
