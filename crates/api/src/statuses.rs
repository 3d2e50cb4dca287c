//! Statuses resource.
//!
//! Endpoints:
//! - POST   /api/v1/statuses
//! - GET    /api/v1/statuses/:id
//! - DELETE /api/v1/statuses/:id
//! - POST   /api/v1/statuses/:id/{reblog,unreblog,favourite,unfavourite}
//! - GET    /api/v1/statuses/:id/{reblogged_by,favourited_by}
//! - GET    /api/v1/accounts/:account_id/statuses

use mastodon_common::{ClientResult, EntityId};
use mastodon_core::{Account, Status, Visibility};
use reqwest::Method;
use tracing::debug;

use crate::{
    client::{Client, api_path},
    collection::Collection,
    executor::RequestExecutor,
    params::Params,
};

const MEDIA_IDS: &str = "media_ids";
const MEDIA_IDS_LIST: &str = "media_ids[]";

/// Optional parameters for creating a status.
///
/// Either the fixed positional set or a free-form options mapping, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusParams {
    /// Legacy positional form.
    Positional {
        /// Status being replied to.
        in_reply_to_id: Option<EntityId>,
        /// Previously uploaded attachments.
        media_ids: Option<Vec<EntityId>>,
        /// Visibility; the account default applies when absent.
        visibility: Option<Visibility>,
    },
    /// Options mapping. `media_ids` and `media_ids[]` are both accepted.
    Options(Params),
}

impl Default for StatusParams {
    fn default() -> Self {
        Self::Options(Params::new())
    }
}

impl From<Params> for StatusParams {
    fn from(params: Params) -> Self {
        Self::Options(params)
    }
}

impl StatusParams {
    /// Normalize into request parameters.
    ///
    /// Media IDs always end up under `media_ids[]`, exactly once. When an
    /// options mapping carries both keys, `media_ids[]` wins.
    #[must_use]
    pub fn into_params(self) -> Params {
        match self {
            Self::Positional {
                in_reply_to_id,
                media_ids,
                visibility,
            } => {
                let mut params = Params::new();
                params.insert_opt("in_reply_to_id", in_reply_to_id);
                params.insert_opt(MEDIA_IDS_LIST, media_ids);
                params.insert_opt("visibility", visibility.map(Visibility::as_str));
                params
            }
            Self::Options(mut params) => {
                if let Some(media_ids) = params.remove(MEDIA_IDS) {
                    if !params.contains_key(MEDIA_IDS_LIST) {
                        params.insert(MEDIA_IDS_LIST, media_ids);
                    }
                }
                params
            }
        }
    }
}

impl<E: RequestExecutor> Client<E> {
    /// Create a new status.
    pub async fn create_status(&self, text: &str, args: StatusParams) -> ClientResult<Status> {
        let mut params = args.into_params();
        params.insert("status", text);

        debug!(params = params.len(), "Creating status");
        self.perform_request_with_object(Method::POST, "/api/v1/statuses", &params)
            .await
    }

    /// Create a new status hidden behind a content warning.
    pub async fn create_status_with_spoiler(
        &self,
        text: &str,
        spoiler: &str,
        args: StatusParams,
    ) -> ClientResult<Status> {
        let mut params = args.into_params();
        params.insert("status", text);
        params.insert("spoiler_text", spoiler);

        debug!(params = params.len(), "Creating status with spoiler");
        self.perform_request_with_object(Method::POST, "/api/v1/statuses", &params)
            .await
    }

    /// Retrieve a status.
    pub async fn status(&self, id: impl Into<EntityId>) -> ClientResult<Status> {
        let id = id.into();
        let path = api_path(&["api", "v1", "statuses", id.as_str()])?;
        self.perform_request_with_object(Method::GET, &path, &Params::new())
            .await
    }

    /// Delete a status.
    ///
    /// Returns `true` whenever the server sent any response body. An empty
    /// 2xx response reads as `false`; error statuses are returned as errors.
    pub async fn destroy_status(&self, id: impl Into<EntityId>) -> ClientResult<bool> {
        let id = id.into();
        let path = api_path(&["api", "v1", "statuses", id.as_str()])?;
        let response = self
            .perform_request(Method::DELETE, &path, &Params::new())
            .await?;
        Ok(response.is_some())
    }

    /// Reblog a status.
    pub async fn reblog(&self, id: impl Into<EntityId>) -> ClientResult<Status> {
        self.status_action(id.into(), "reblog").await
    }

    /// Undo a reblog of a status.
    pub async fn unreblog(&self, id: impl Into<EntityId>) -> ClientResult<Status> {
        self.status_action(id.into(), "unreblog").await
    }

    /// Favourite a status.
    pub async fn favourite(&self, id: impl Into<EntityId>) -> ClientResult<Status> {
        self.status_action(id.into(), "favourite").await
    }

    /// Undo a favourite of a status.
    pub async fn unfavourite(&self, id: impl Into<EntityId>) -> ClientResult<Status> {
        self.status_action(id.into(), "unfavourite").await
    }

    /// Accounts that reblogged a status.
    pub async fn reblogged_by(
        &self,
        id: impl Into<EntityId>,
        options: impl Into<Params>,
    ) -> ClientResult<Collection<Account>> {
        let id = id.into();
        let path = api_path(&["api", "v1", "statuses", id.as_str(), "reblogged_by"])?;
        self.perform_request_with_collection(Method::GET, &path, &options.into())
            .await
    }

    /// Accounts that favourited a status.
    pub async fn favourited_by(
        &self,
        id: impl Into<EntityId>,
        options: impl Into<Params>,
    ) -> ClientResult<Collection<Account>> {
        let id = id.into();
        let path = api_path(&["api", "v1", "statuses", id.as_str(), "favourited_by"])?;
        self.perform_request_with_collection(Method::GET, &path, &options.into())
            .await
    }

    /// Statuses posted by an account.
    pub async fn statuses(
        &self,
        account_id: impl Into<EntityId>,
        options: impl Into<Params>,
    ) -> ClientResult<Collection<Status>> {
        let account_id = account_id.into();
        let path = api_path(&["api", "v1", "accounts", account_id.as_str(), "statuses"])?;
        self.perform_request_with_collection(Method::GET, &path, &options.into())
            .await
    }

    async fn status_action(&self, id: EntityId, action: &str) -> ClientResult<Status> {
        let path = api_path(&["api", "v1", "statuses", id.as_str(), action])?;
        self.perform_request_with_object(Method::POST, &path, &Params::new())
            .await
    }
}
