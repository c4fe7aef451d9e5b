use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, param::Query, payload::Json};

use crate::api::BearerAuth;
use crate::errors::PointsError;
use crate::services::AuthLedgerService;
use crate::types::dto::points::{
    MemberCodeResponse, RecipientResponse, TransferRequest, TransferResponse,
};

const DEFAULT_RECIPIENT_LIMIT: u64 = 10;

#[derive(Tags)]
enum PointsTags {
    /// Point balance endpoints
    Points,
}

/// Transfers between accounts, always on behalf of the token holder
pub struct PointsApi {
    service: Arc<AuthLedgerService>,
}

impl PointsApi {
    pub fn new(service: Arc<AuthLedgerService>) -> Self {
        Self { service }
    }
}

#[OpenApi(prefix_path = "/points")]
impl PointsApi {
    /// Send points to a member code or email
    #[oai(path = "/transfer", method = "post", tag = "PointsTags::Points")]
    async fn transfer(
        &self,
        auth: BearerAuth,
        body: Json<TransferRequest>,
    ) -> Result<Json<TransferResponse>, PointsError> {
        let sender = self.service.identity(&auth.0.token).await?;

        let record = self
            .service
            .transfer(&sender.email, &body.to, body.amount, &body.note)
            .await?;

        Ok(Json(TransferResponse::from(record)))
    }

    /// Accounts the caller has sent points to, most recent first
    #[oai(path = "/recipients", method = "get", tag = "PointsTags::Points")]
    async fn recipients(
        &self,
        auth: BearerAuth,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<RecipientResponse>>, PointsError> {
        let sender = self.service.identity(&auth.0.token).await?;

        let recipients = self
            .service
            .recent_recipients(&sender.email, limit.0.unwrap_or(DEFAULT_RECIPIENT_LIMIT))
            .await?;

        Ok(Json(recipients.into_iter().map(RecipientResponse::from).collect()))
    }

    /// Assign the caller a member code, or return the existing one
    #[oai(path = "/member-code", method = "post", tag = "PointsTags::Points")]
    async fn member_code(&self, auth: BearerAuth) -> Result<Json<MemberCodeResponse>, PointsError> {
        let account = self.service.identity(&auth.0.token).await?;

        let member_code = self.service.assign_member_code(&account.email).await?;

        Ok(Json(MemberCodeResponse { member_code }))
    }
}
