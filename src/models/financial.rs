use serde::{Deserialize, Serialize};

use super::session::lenient_f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  #[default]
  Pending,
  Paid,
  Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
  pub id: String,
  pub student_id: String,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub amount: f64,
  pub due_date: String,
  #[serde(default)]
  pub status: PaymentStatus,
  #[serde(default)]
  pub payment_date: Option<String>,
  #[serde(default)]
  pub payment_method: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
}

/// Body of `POST /financial/payments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
  pub student_id: String,
  pub amount: f64,
  pub due_date: String,
  pub status: PaymentStatus,
  pub payment_method: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentUpdate {
  pub status: PaymentStatus,
  pub payment_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
  #[serde(default, deserialize_with = "lenient_f64")]
  pub total_received: f64,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub total_pending: f64,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub total_overdue: f64,
}
