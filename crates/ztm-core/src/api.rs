// ── Remote client capability ──
//
// The reconciler only ever sees this trait. `CentralClient` implements it
// for real traffic; tests plug in an in-memory controller.

use std::future::Future;

use ztm_api::{CentralClient, Error, Member};

/// The five member operations the reconciler needs from a controller.
pub trait MemberApi: Send + Sync {
    fn create_member(&self, member: &Member) -> impl Future<Output = Result<Member, Error>> + Send;

    fn update_member(&self, member: &Member) -> impl Future<Output = Result<Member, Error>> + Send;

    /// `Ok(None)` signals that the member does not exist.
    fn get_member(
        &self,
        network_id: &str,
        node_id: &str,
    ) -> impl Future<Output = Result<Option<Member>, Error>> + Send;

    fn delete_member(&self, member: &Member) -> impl Future<Output = Result<(), Error>> + Send;

    fn member_exists(
        &self,
        network_id: &str,
        node_id: &str,
    ) -> impl Future<Output = Result<bool, Error>> + Send;
}

impl MemberApi for CentralClient {
    async fn create_member(&self, member: &Member) -> Result<Member, Error> {
        CentralClient::create_member(self, member).await
    }

    async fn update_member(&self, member: &Member) -> Result<Member, Error> {
        CentralClient::update_member(self, member).await
    }

    async fn get_member(&self, network_id: &str, node_id: &str) -> Result<Option<Member>, Error> {
        CentralClient::get_member(self, network_id, node_id).await
    }

    async fn delete_member(&self, member: &Member) -> Result<(), Error> {
        CentralClient::delete_member(self, member).await
    }

    async fn member_exists(&self, network_id: &str, node_id: &str) -> Result<bool, Error> {
        CentralClient::member_exists(self, network_id, node_id).await
    }
}
