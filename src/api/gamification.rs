use crate::error::ApiError;
use crate::models::gamification::{BadgeSet, PersonalRecords, RankingEntry};
use super::ApiClient;

impl ApiClient {
  pub async fn badges(&self) -> Result<BadgeSet, ApiError> {
    self.get_json("/gamification/badges", &[]).await
  }

  /// Best set per exercise
  pub async fn personal_records(&self) -> Result<PersonalRecords, ApiError> {
    self.get_json("/gamification/records", &[]).await
  }

  pub async fn ranking(&self) -> Result<Vec<RankingEntry>, ApiError> {
    self.get_json("/gamification/ranking", &[]).await
  }
}
