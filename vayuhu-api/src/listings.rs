use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use vayuhu_core::GatewayResult;
use vayuhu_shared::models::admin::CompanyProfile;
use vayuhu_shared::models::listings::{
    BlogPost, BookingSummary, RevenuePoint, Reservation, VisitorRecord, WorkspaceBooking,
};

use crate::client::ApiClient;

#[derive(Serialize)]
struct UserScope {
    user_id: i64,
}

#[derive(Deserialize)]
struct Reservations {
    #[serde(default)]
    reservations: Vec<Reservation>,
}

#[derive(Deserialize)]
struct Bookings {
    #[serde(default)]
    bookings: Vec<WorkspaceBooking>,
}

#[derive(Deserialize)]
struct Revenue {
    #[serde(default)]
    revenue: Vec<RevenuePoint>,
}

#[derive(Deserialize)]
struct Visitors {
    #[serde(default)]
    visitors: Vec<VisitorRecord>,
}

#[derive(Deserialize)]
struct Profile {
    #[serde(default)]
    profile: Option<CompanyProfile>,
}

#[derive(Deserialize)]
struct Blogs {
    #[serde(default)]
    data: Vec<BlogPost>,
}

impl ApiClient {
    /// Every reservation, for the admin dashboard.
    pub async fn reservations(&self) -> GatewayResult<Vec<Reservation>> {
        let body: Reservations = self.get("/get_reservations.php", &[]).await?;
        Ok(body.reservations)
    }

    pub async fn workspace_bookings(&self, user_id: i64) -> GatewayResult<Vec<WorkspaceBooking>> {
        let body: Bookings = self
            .post_json("/get_workspace_bookings.php", &UserScope { user_id })
            .await?;
        Ok(body.bookings)
    }

    pub async fn booking_summary(&self, user_id: i64) -> GatewayResult<BookingSummary> {
        self.post_json("/get_booking_summary.php", &UserScope { user_id })
            .await
    }

    pub async fn monthly_revenue(&self) -> GatewayResult<Vec<RevenuePoint>> {
        let body: Revenue = self.get("/get_monthly_revenue.php", &[]).await?;
        Ok(body.revenue)
    }

    /// Visitors registered by one user.
    pub async fn visitors(&self, user_id: i64) -> GatewayResult<Vec<VisitorRecord>> {
        let body: Visitors = self
            .post_json("/get_visitors.php", &UserScope { user_id })
            .await?;
        Ok(body.visitors)
    }

    pub async fn all_visitors(&self) -> GatewayResult<Vec<VisitorRecord>> {
        let body: Visitors = self.get("/get_all_visitors.php", &[]).await?;
        Ok(body.visitors)
    }

    /// `None` when the user has not filled in a profile yet.
    pub async fn company_profile(&self, user_id: i64) -> GatewayResult<Option<CompanyProfile>> {
        let body: Profile = self
            .get("/get_company_profile.php", &[("user_id", user_id.to_string())])
            .await?;
        if body.profile.is_none() {
            warn!(user_id, "No company profile on file");
        }
        Ok(body.profile)
    }

    pub async fn active_bookings(&self, user_id: i64) -> GatewayResult<Vec<WorkspaceBooking>> {
        let body: Bookings = self
            .post_json("/get_active_bookings.php", &UserScope { user_id })
            .await?;
        Ok(body.bookings)
    }

    pub async fn blogs(&self) -> GatewayResult<Vec<BlogPost>> {
        // Cache-buster for the blog list.
        let nocache = Utc::now().timestamp_millis().to_string();
        let body: Blogs = self.get("/blog_list.php", &[("nocache", nocache)]).await?;
        Ok(body.data)
    }
}
