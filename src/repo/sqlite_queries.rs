//! SQL statements used by [`super::sqlite::SqlxSqliteRepo`]. Date-range
//! filtering and sorting happen in the api layer after the fetch, so the
//! list queries here stay simple exact-match lookups.

/// Tables holding records that belong to exactly one pet. Cascade deletion
/// iterates this list inside one transaction; the schema also declares
/// `ON DELETE CASCADE` as a referential backstop. Keep this as the single
/// source of truth for pet-dependent tables.
pub const PET_DEPENDENT_TABLES: [&str; 4] = [
    "appointment",
    "medication_course",
    "weight_sample",
    "feeding_log",
];

pub const QUERY_INSERT_USER_APP: &str = r#"
INSERT INTO user_app(email,password_hash,push_token,is_enabled,created_at,updated_at)
VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_GET_USER_APP_BY_EMAIL: &str = r#"
SELECT
    id,email,password_hash,push_token,is_enabled,created_at,updated_at
FROM user_app
WHERE email=$1;
"#;

pub const QUERY_GET_USER_APP_BY_ID: &str = r#"
SELECT
    id,email,password_hash,push_token,is_enabled,created_at,updated_at
FROM user_app
WHERE id=$1;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    external_id,user_app_id,pet_name,species,breed,birthday,last_weight,
    veterinarian,microchip_number,
    alert_vaccination,alert_deworming,alert_checkup,alert_medication,
    next_vaccination,next_deworming,next_checkup,photo_url,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,$6,$7,
    $8,$9,
    $10,$11,$12,$13,
    $14,$15,$16,$17,
    $18,$19
);
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet SET
    pet_name=$3,species=$4,breed=$5,birthday=$6,
    veterinarian=$7,microchip_number=$8,
    alert_vaccination=$9,alert_deworming=$10,alert_checkup=$11,alert_medication=$12,
    updated_at=$13
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_GET_ALL_PETS_USER_ID: &str = r#"
SELECT
    id,external_id,user_app_id,pet_name,species,breed,birthday,last_weight,
    veterinarian,microchip_number,
    alert_vaccination,alert_deworming,alert_checkup,alert_medication,
    next_vaccination,next_deworming,next_checkup,photo_url,
    created_at,updated_at
FROM pet
WHERE user_app_id=$1;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    id,external_id,user_app_id,pet_name,species,breed,birthday,last_weight,
    veterinarian,microchip_number,
    alert_vaccination,alert_deworming,alert_checkup,alert_medication,
    next_vaccination,next_deworming,next_checkup,photo_url,
    created_at,updated_at
FROM pet
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_INSERT_APPOINTMENT: &str = r#"
INSERT INTO appointment (
    pet_id,date,time,category,veterinarian,reason,status,notes,created_at
) SELECT p.id,$3,$4,$5,$6,$7,$8,$9,$10
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id;
"#;

pub const QUERY_GET_PET_APPOINTMENTS: &str = r#"
SELECT
    a.id,a.pet_id,a.date,a.time,a.category,a.veterinarian,a.reason,a.status,
    a.notes,a.created_at
FROM appointment AS a
INNER JOIN pet AS p ON (p.id=a.pet_id)
WHERE a.pet_id=$1 AND p.user_app_id=$2;
"#;

pub const QUERY_SET_APPOINTMENT_STATUS: &str = r#"
UPDATE appointment SET status=$4
WHERE id=$1 AND pet_id=$2
    AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$3);
"#;

pub const QUERY_DELETE_APPOINTMENT: &str = r#"
DELETE FROM appointment
WHERE id=$1 AND pet_id=$2
    AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$3);
"#;

pub const QUERY_INSERT_MEDICATION: &str = r#"
INSERT INTO medication_course (
    pet_id,name,dose,frequency,start_date,end_date,status,notes,created_at
) SELECT p.id,$3,$4,$5,$6,$7,$8,$9,$10
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id;
"#;

pub const QUERY_GET_PET_MEDICATIONS: &str = r#"
SELECT
    m.id,m.pet_id,m.name,m.dose,m.frequency,m.start_date,m.end_date,m.status,
    m.notes,m.created_at
FROM medication_course AS m
INNER JOIN pet AS p ON (p.id=m.pet_id)
WHERE m.pet_id=$1 AND p.user_app_id=$2;
"#;

pub const QUERY_SET_MEDICATION_STATUS: &str = r#"
UPDATE medication_course SET status=$4
WHERE id=$1 AND pet_id=$2
    AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$3);
"#;

pub const QUERY_DELETE_MEDICATION: &str = r#"
DELETE FROM medication_course
WHERE id=$1 AND pet_id=$2
    AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$3);
"#;

pub const QUERY_INSERT_WEIGHT_SAMPLE: &str = r#"
INSERT INTO weight_sample (
    pet_id,date,weight,notes,created_at
) SELECT p.id,$3,$4,$5,$6
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id;
"#;

pub const QUERY_GET_PET_WEIGHT_SAMPLES: &str = r#"
SELECT
    w.id,w.pet_id,w.date,w.weight,w.notes,w.created_at
FROM weight_sample AS w
INNER JOIN pet AS p ON (p.id=w.pet_id)
WHERE w.pet_id=$1 AND p.user_app_id=$2;
"#;

pub const QUERY_DELETE_WEIGHT_SAMPLE: &str = r#"
DELETE FROM weight_sample
WHERE id=$1 AND pet_id=$2
    AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$3);
"#;

pub const QUERY_INSERT_FEEDING_LOG: &str = r#"
INSERT INTO feeding_log (
    pet_id,date,time,food_type,amount,notes,created_at
) SELECT p.id,$3,$4,$5,$6,$7,$8
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id;
"#;

pub const QUERY_GET_PET_FEEDING_LOGS: &str = r#"
SELECT
    f.id,f.pet_id,f.date,f.time,f.food_type,f.amount,f.notes,f.created_at
FROM feeding_log AS f
INNER JOIN pet AS p ON (p.id=f.pet_id)
WHERE f.pet_id=$1 AND p.user_app_id=$2;
"#;
