use serde::{Deserialize, Serialize};

/// Coupon definition submitted by an admin. Sent as multipart form fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub coupon_code: String,
    pub valid_from: String,
    pub valid_to: String,
    pub user_type: String,
    pub space_type: String,
    pub discount: String,
    pub min_price: String,
    pub max_price: String,
    pub pack_type: String,
    pub email: String,
    pub mobile: String,
}

impl Default for Coupon {
    fn default() -> Self {
        Self {
            coupon_code: String::new(),
            valid_from: String::new(),
            valid_to: String::new(),
            user_type: "ALL Users".to_string(),
            space_type: "ALL Spaces".to_string(),
            discount: String::new(),
            min_price: String::new(),
            max_price: String::new(),
            pack_type: "ALL Spaces".to_string(),
            email: String::new(),
            mobile: String::new(),
        }
    }
}

impl Coupon {
    /// Field name/value pairs in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("coupon_code", self.coupon_code.clone()),
            ("valid_from", self.valid_from.clone()),
            ("valid_to", self.valid_to.clone()),
            ("user_type", self.user_type.clone()),
            ("space_type", self.space_type.clone()),
            ("discount", self.discount.clone()),
            ("min_price", self.min_price.clone()),
            ("max_price", self.max_price.clone()),
            ("pack_type", self.pack_type.clone()),
            ("email", self.email.clone()),
            ("mobile", self.mobile.clone()),
        ]
    }
}

/// Company profile as returned by `/get_company_profile.php`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CompanyProfile {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub gst_no: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Logo file attached to a profile update.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Profile update submitted as multipart to `/update_company_profile.php`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyProfileUpdate {
    pub user_id: i64,
    pub company_name: String,
    pub gst_no: String,
    pub contact: String,
    pub address: String,
    pub email: String,
    pub logo: Option<LogoUpload>,
}

impl CompanyProfileUpdate {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user_id", self.user_id.to_string()),
            ("companyName", self.company_name.clone()),
            ("gstNo", self.gst_no.clone()),
            ("contact", self.contact.clone()),
            ("address", self.address.clone()),
            ("email", self.email.clone()),
        ]
    }
}
