use crate::error::ApiError;
use crate::models::financial::{FinancialSummary, NewPayment, Payment, PaymentStatus, PaymentUpdate};
use super::{segment, Ack, ApiClient};

impl ApiClient {
  /// Payments due within `[start_date, end_date]`, both `YYYY-MM-DD`
  pub async fn list_payments(&self, start_date: &str, end_date: &str) -> Result<Vec<Payment>, ApiError> {
    self
      .get_json(
        "/financial/payments",
        &[("start_date", Some(start_date)), ("end_date", Some(end_date))],
      )
      .await
  }

  pub async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, ApiError> {
    if payment.student_id.is_empty() || payment.due_date.is_empty() || payment.amount <= 0.0 {
      return Err(ApiError::Validation("Preencha os campos obrigatórios".into()));
    }
    self.post_json("/financial/payments", &[], payment).await
  }

  /// Mark a charge as paid on `payment_date`
  pub async fn mark_payment_paid(&self, payment_id: &str, payment_date: &str) -> Result<Ack, ApiError> {
    let update = PaymentUpdate {
      status: PaymentStatus::Paid,
      payment_date: payment_date.to_string(),
    };
    self
      .put_json(&format!("/financial/payments/{}", segment(payment_id)), &update)
      .await
  }

  pub async fn delete_payment(&self, payment_id: &str) -> Result<Ack, ApiError> {
    self
      .delete(&format!("/financial/payments/{}", segment(payment_id)))
      .await
  }

  pub async fn financial_summary(&self, start_date: &str, end_date: &str) -> Result<FinancialSummary, ApiError> {
    self
      .get_json(
        "/financial/summary",
        &[("start_date", Some(start_date)), ("end_date", Some(end_date))],
      )
      .await
  }

  /// Charges of one student, as seen from the student's own screen
  pub async fn student_payments(&self, student_id: &str) -> Result<Vec<Payment>, ApiError> {
    self
      .get_json(&format!("/financial/student/{}", segment(student_id)), &[])
      .await
  }
}
