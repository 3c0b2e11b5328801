pub const QUERY_INSERT_USER_APP: &str = r#"
INSERT INTO user_app(
    username,email,password_hash,profile_image,is_admin,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7);
"#;

pub const QUERY_GET_USER_APP_BY_EMAIL: &str = r#"
SELECT
    id,username,email,password_hash,profile_image,is_admin,created_at,updated_at
FROM user_app
WHERE email=$1;
"#;

pub const QUERY_GET_USER_APP_BY_USERNAME: &str = r#"
SELECT
    id,username,email,password_hash,profile_image,is_admin,created_at,updated_at
FROM user_app
WHERE username=$1;
"#;

pub const QUERY_GET_USER_APP_BY_ID: &str = r#"
SELECT
    id,username,email,password_hash,profile_image,is_admin,created_at,updated_at
FROM user_app
WHERE id=$1;
"#;

pub const QUERY_UPDATE_USER_APP_PROFILE: &str = r#"
UPDATE user_app SET username=$1,email=$2,updated_at=$3 WHERE id=$4;
"#;

pub const QUERY_UPDATE_USER_APP_PROFILE_IMAGE: &str = r#"
UPDATE user_app SET profile_image=$1,updated_at=$2 WHERE id=$3;
"#;

pub const QUERY_GET_USER_PHOTOS: &str = r#"
SELECT id,user_app_id,uri,uploaded_at
FROM user_photo
WHERE user_app_id=$1
ORDER BY uploaded_at DESC, id DESC;
"#;

pub const QUERY_INSERT_USER_PHOTO: &str = r#"
INSERT INTO user_photo(user_app_id,uri,uploaded_at) VALUES($1,$2,$3)
RETURNING id,user_app_id,uri,uploaded_at;
"#;

pub const QUERY_DELETE_USER_PHOTO: &str = r#"
DELETE FROM user_photo WHERE id=$1 AND user_app_id=$2 RETURNING uri;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    user_app_id,name,breed,age,gender,size,
    medical_condition,behavioral_concern,treat,rabies_expiry,profile_image,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,$6,
    $7,$8,$9,$10,$11,
    $12,$13
);
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet SET
    name=$1,breed=$2,age=$3,gender=$4,size=$5,
    medical_condition=$6,behavioral_concern=$7,treat=$8,rabies_expiry=$9,
    profile_image=$10,updated_at=$11
WHERE id=$12 AND user_app_id=$13;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    id,user_app_id,name,breed,age,gender,size,
    medical_condition,behavioral_concern,treat,rabies_expiry,profile_image,
    created_at,updated_at
FROM pet
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_GET_ALL_PETS_BY_USER_ID: &str = r#"
SELECT
    id,user_app_id,name,breed,age,gender,size,
    medical_condition,behavioral_concern,treat,rabies_expiry,profile_image,
    created_at,updated_at
FROM pet
WHERE user_app_id=$1
ORDER BY created_at, id;
"#;

pub const QUERY_DELETE_PET: &str = r#"DELETE FROM pet WHERE id=$1 AND user_app_id=$2;"#;

pub const QUERY_INSERT_APPOINTMENT: &str = r#"
INSERT INTO appointment (
    user_app_id,pet_id,appointment_date,time_slot,total_amount,
    payment_method,payment_status,status,admin_notes,cancellation_reason,
    reminder_sent,created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,
    $6,$7,$8,'','',
    0,$9,$10
);
"#;

pub const QUERY_INSERT_APPOINTMENT_SERVICE: &str = r#"
INSERT INTO appointment_service(appointment_id,position,service_name,price)
VALUES($1,$2,$3,$4);
"#;

pub const QUERY_GET_APPOINTMENT_BY_ID: &str = r#"
SELECT
    a.id,a.user_app_id,a.pet_id,a.appointment_date,a.time_slot,a.total_amount,
    a.payment_method,a.payment_status,a.status,a.admin_notes,a.cancellation_reason,
    a.reminder_sent,a.created_at,a.updated_at,
    p.name AS pet_name,p.breed AS pet_breed,
    p.profile_image AS pet_profile_image,p.size AS pet_size
FROM appointment AS a
LEFT JOIN pet AS p ON (p.id=a.pet_id)
WHERE a.id=$1;
"#;

pub const QUERY_GET_APPOINTMENTS_BY_USER_ID: &str = r#"
SELECT
    a.id,a.user_app_id,a.pet_id,a.appointment_date,a.time_slot,a.total_amount,
    a.payment_method,a.payment_status,a.status,a.admin_notes,a.cancellation_reason,
    a.reminder_sent,a.created_at,a.updated_at,
    p.name AS pet_name,p.breed AS pet_breed,
    p.profile_image AS pet_profile_image,p.size AS pet_size
FROM appointment AS a
LEFT JOIN pet AS p ON (p.id=a.pet_id)
WHERE a.user_app_id=$1
ORDER BY a.created_at DESC, a.id DESC;
"#;

pub const QUERY_GET_ALL_APPOINTMENTS: &str = r#"
SELECT
    a.id,a.user_app_id,a.pet_id,a.appointment_date,a.time_slot,a.total_amount,
    a.payment_method,a.payment_status,a.status,a.admin_notes,a.cancellation_reason,
    a.reminder_sent,a.created_at,a.updated_at,
    p.name AS pet_name,p.breed AS pet_breed,
    p.profile_image AS pet_profile_image,p.size AS pet_size,
    u.username AS user_username,u.email AS user_email
FROM appointment AS a
LEFT JOIN pet AS p ON (p.id=a.pet_id)
LEFT JOIN user_app AS u ON (u.id=a.user_app_id)
ORDER BY a.created_at DESC, a.id DESC;
"#;

pub const QUERY_GET_APPOINTMENTS_DUE_FOR_REMINDER: &str = r#"
SELECT
    a.id,a.user_app_id,a.pet_id,a.appointment_date,a.time_slot,a.total_amount,
    a.payment_method,a.payment_status,a.status,a.admin_notes,a.cancellation_reason,
    a.reminder_sent,a.created_at,a.updated_at,
    p.name AS pet_name,p.breed AS pet_breed,
    p.profile_image AS pet_profile_image,p.size AS pet_size
FROM appointment AS a
LEFT JOIN pet AS p ON (p.id=a.pet_id)
WHERE
    a.appointment_date=$1 AND
    a.status='APPROVED' AND
    a.reminder_sent=0
ORDER BY a.id;
"#;

/// `$1` NULL selects the lines of every appointment
pub const QUERY_GET_SERVICE_LINES: &str = r#"
SELECT s.appointment_id,s.service_name,s.price
FROM appointment_service AS s
JOIN appointment AS a ON (a.id=s.appointment_id)
WHERE ($1 IS NULL OR a.user_app_id=$1)
ORDER BY s.appointment_id, s.position;
"#;

pub const QUERY_GET_SERVICE_LINES_BY_APPOINTMENT_ID: &str = r#"
SELECT appointment_id,service_name,price
FROM appointment_service
WHERE appointment_id=$1
ORDER BY position;
"#;

pub const QUERY_UPDATE_APPOINTMENT_STATUS: &str = r#"
UPDATE appointment SET
    status=$1,
    admin_notes=COALESCE($2,admin_notes),
    cancellation_reason=COALESCE($3,cancellation_reason),
    updated_at=$4
WHERE id=$5;
"#;

pub const QUERY_MARK_APPOINTMENT_REMINDER_SENT: &str = r#"
UPDATE appointment SET reminder_sent=1,updated_at=$1
WHERE id=$2 AND reminder_sent=0;
"#;

pub const QUERY_DELETE_APPOINTMENT: &str = r#"
DELETE FROM appointment WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_INSERT_NOTIFICATION: &str = r#"
INSERT INTO notification(
    user_app_id,notification_type,title,message,appointment_id,is_read,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,0,$6,$7);
"#;

pub const QUERY_GET_NOTIFICATIONS_BY_USER_ID: &str = r#"
SELECT
    id,user_app_id,notification_type,title,message,appointment_id,is_read,created_at,updated_at
FROM notification
WHERE user_app_id=$1
ORDER BY created_at DESC, id DESC
LIMIT $2;
"#;

pub const QUERY_MARK_NOTIFICATION_READ: &str = r#"
UPDATE notification SET is_read=1,updated_at=$1
WHERE id=$2 AND user_app_id=$3
RETURNING
    id,user_app_id,notification_type,title,message,appointment_id,is_read,created_at,updated_at;
"#;

pub const QUERY_MARK_ALL_NOTIFICATIONS_READ: &str = r#"
UPDATE notification SET is_read=1,updated_at=$1
WHERE user_app_id=$2 AND is_read=0;
"#;

pub const QUERY_COUNT_UNREAD_NOTIFICATIONS: &str = r#"
SELECT COUNT(*) FROM notification WHERE user_app_id=$1 AND is_read=0;
"#;

pub const QUERY_DELETE_NOTIFICATION: &str = r#"
DELETE FROM notification WHERE id=$1 AND user_app_id=$2;
"#;
