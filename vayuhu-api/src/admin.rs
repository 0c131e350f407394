use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::info;
use vayuhu_core::{GatewayError, GatewayResult};
use vayuhu_shared::models::admin::{CompanyProfileUpdate, Coupon};
use vayuhu_shared::models::visitor::AdminVisitor;

use crate::client::ApiClient;

#[derive(Serialize)]
struct AdminVisitorRequest<'a> {
    #[serde(flatten)]
    visitor: &'a AdminVisitor,
    admin_id: i64,
    /// Walk-ins registered by an admin belong to no user.
    user_id: Option<i64>,
}

fn text_form(fields: Vec<(&'static str, String)>) -> Form {
    fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

impl ApiClient {
    /// Register a walk-in visitor on behalf of the signed-in admin. No payment is taken.
    pub async fn admin_add_visitor(&self, visitor: &AdminVisitor) -> GatewayResult<()> {
        let session = self.require_session()?;
        if !session.identity.is_admin() {
            return Err(GatewayError::Unauthenticated);
        }

        let request = AdminVisitorRequest {
            visitor,
            admin_id: session.identity.id(),
            user_id: None,
        };
        let _: IgnoredAny = self.post_json("/admin_add_visitor.php", &request).await?;
        info!(admin_id = session.identity.id(), "Walk-in visitor added");
        Ok(())
    }

    pub async fn update_company_profile(&self, update: &CompanyProfileUpdate) -> GatewayResult<()> {
        let mut form = text_form(update.form_fields());
        if let Some(logo) = &update.logo {
            let part = Part::bytes(logo.bytes.clone())
                .file_name(logo.file_name.clone())
                .mime_str(&logo.mime)
                .map_err(|e| GatewayError::Transport(e.to_string()))?;
            form = form.part("logo", part);
        }

        let _: IgnoredAny = self
            .post_multipart("/update_company_profile.php", form)
            .await?;
        info!(user_id = update.user_id, "Company profile updated");
        Ok(())
    }

    pub async fn add_coupon(&self, coupon: &Coupon) -> GatewayResult<()> {
        self.require_session()?;
        let _: IgnoredAny = self
            .post_multipart("/add_coupon.php", text_form(coupon.form_fields()))
            .await?;
        info!(code = %coupon.coupon_code, "Coupon added");
        Ok(())
    }
}
