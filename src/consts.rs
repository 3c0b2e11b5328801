use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const BEARER_PREFIX: &str = "Bearer ";
pub const DEFAULT_AVATAR_URL: &str = "https://api.dicebear.com/9.x/croodles/svg?seed=";

pub const MIN_USERNAME_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 6;

pub const NOTIFICATIONS_PAGE_SIZE: i64 = 50;
pub const DEFAULT_CANCELLATION_REASON: &str = "Cancelled by user";

pub const PIC_MAX_SIZE_BYTES: usize = 5 * 1024 * 1024;
pub const FORM_FIELD_MAX_SIZE_BYTES: usize = 64 * 1024;
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

pub const UPLOADS_URL_PREFIX: &str = "/uploads";
pub const PET_PICS_DIR: &str = "pets";
pub const PROFILE_PICS_DIR: &str = "profiles";
pub const USER_PHOTOS_DIR: &str = "user-photos";

// multipart field names of uploaded pics
pub const PROFILE_IMAGE_FIELD: &str = "profileImage";
pub const GALLERY_IMAGE_FIELD: &str = "image";

/// Display format of appointment dates, e.g. "November 03, 2025"
pub const APPOINTMENT_DATE_LABEL_FORMAT: &str = "%B %d, %Y";

/// Grooming services offered and their unit price per pet
pub const SERVICE_CATALOG: [(&str, Decimal); 7] = [
    ("Flea Treatment", dec!(350)),
    ("Bath & Blow Dry", dec!(350)),
    ("Teeth Brushing", dec!(200)),
    ("Nail Trimming", dec!(150)),
    ("Ear Cleaning", dec!(180)),
    ("Haircut & Styling", dec!(500)),
    ("Full Grooming", dec!(600)),
];
