use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::Serialize;
use vayuhu_core::{BookingGateway, GatewayResult};
use vayuhu_shared::models::cart::BookingEmail;
use vayuhu_shared::models::payment::CreateOrderRequest;
use vayuhu_shared::models::visitor::{NewVisitor, VisitorDateApproval, VisitorDateCheck};
use vayuhu_shared::{BookingRecord, PaymentOrder, PaymentResult};

use crate::client::ApiClient;

#[derive(Serialize)]
struct BulkBookings<'a> {
    bookings: &'a [BookingRecord],
}

#[async_trait]
impl BookingGateway for ApiClient {
    async fn create_payment_order(&self, amount: Decimal) -> GatewayResult<PaymentOrder> {
        self.post_json("/create_razorpay_order.php", &CreateOrderRequest { amount })
            .await
    }

    async fn verify_payment(&self, result: &PaymentResult) -> GatewayResult<()> {
        let _: IgnoredAny = self.post_json("/verify_payment.php", result).await?;
        Ok(())
    }

    async fn add_bulk_bookings(&self, bookings: &[BookingRecord]) -> GatewayResult<()> {
        let _: IgnoredAny = self
            .post_json("/add_bulk_bookings.php", &BulkBookings { bookings })
            .await?;
        Ok(())
    }

    async fn add_visitor(&self, visitor: &NewVisitor) -> GatewayResult<()> {
        let _: IgnoredAny = self.post_json("/add_visitor.php", visitor).await?;
        Ok(())
    }

    async fn send_booking_email(&self, email: &BookingEmail) -> GatewayResult<()> {
        let _: IgnoredAny = self.post_json("/send_booking_email.php", email).await?;
        Ok(())
    }

    async fn validate_visitor_date(
        &self,
        check: &VisitorDateCheck,
    ) -> GatewayResult<VisitorDateApproval> {
        self.post_json("/validate_visitor_date.php", check).await
    }
}
