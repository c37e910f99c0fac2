use ntex::{
    http::Payload,
    web::{Error, FromRequest, HttpRequest},
};
use ntex_identity::RequestIdentity;

use crate::front::errors;
use crate::models;

pub struct CheckUserCanAccessService;

/// Extracts the logged user from the encrypted identity cookie
fn get_logged_user(auth_cookie: Option<String>) -> Result<models::user_app::User, Error> {
    if let Ok(user) =
        serde_json::from_str::<models::user_app::User>(&auth_cookie.unwrap_or_default())
    {
        return Ok(user);
    }

    Err(errors::UserError::Unauthorized.into())
}

impl<Err> FromRequest<Err> for models::user_app::User {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let identity_cookie = req.get_identity();
        futures::future::ready(get_logged_user(identity_cookie))
    }
}

impl<Err> FromRequest<Err> for CheckUserCanAccessService {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let identity_cookie = req.get_identity();
        match get_logged_user(identity_cookie) {
            Ok(user) => {
                if user.can_access_service() {
                    futures::future::ready(Ok(Self))
                } else {
                    futures::future::ready(Err(errors::UserError::Unauthorized.into()))
                }
            }
            Err(err) => futures::future::ready(Err(err)),
        }
    }
}
