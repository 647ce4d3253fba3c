//! Read-only catalog content: services, news, videos, protected areas,
//! measures, team and regulations.
//!
//! Everything here is public except regulations, which the API serves only
//! to authenticated users.

use std::sync::Arc;

use core_session::SessionManager;
use provider_ambiente::{
    AmbienteConnector, Measure, NewsItem, ProtectedArea, Regulation, Service, TeamMember, Video,
};
use provider_ambiente::normalize;

use crate::auth::AuthGate;
use crate::error::Result;

#[derive(Clone)]
pub struct CatalogService {
    connector: AmbienteConnector,
    gate: AuthGate,
}

impl CatalogService {
    pub(crate) fn new(connector: AmbienteConnector, session: Arc<SessionManager>) -> Self {
        Self {
            connector,
            gate: AuthGate::new(session),
        }
    }

    pub async fn services(&self) -> Result<Vec<Service>> {
        self.connector.services().await.map_err(Into::into)
    }

    pub async fn service(&self, id: &str) -> Result<Service> {
        self.connector.service(id).await.map_err(Into::into)
    }

    pub async fn news(&self) -> Result<Vec<NewsItem>> {
        self.connector.news().await.map_err(Into::into)
    }

    pub async fn videos(&self, category: Option<&str>) -> Result<Vec<Video>> {
        self.connector.videos(category).await.map_err(Into::into)
    }

    pub async fn measures(&self) -> Result<Vec<Measure>> {
        self.connector.measures().await.map_err(Into::into)
    }

    pub async fn team(&self, department: Option<&str>) -> Result<Vec<TeamMember>> {
        self.connector.team(department).await.map_err(Into::into)
    }

    pub async fn protected_areas(&self) -> Result<Vec<ProtectedArea>> {
        self.connector.protected_areas().await.map_err(Into::into)
    }

    /// Protected areas carrying finite coordinates, for map screens.
    pub async fn plottable_protected_areas(&self) -> Result<Vec<ProtectedArea>> {
        let areas = self.protected_areas().await?;
        Ok(normalize::plottable_areas(&areas))
    }

    /// Environmental regulations. Requires an authenticated session; blank
    /// filters are dropped.
    pub async fn regulations(
        &self,
        kind: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Regulation>> {
        let token = self.gate.bearer().await?;
        let result = self.connector.regulations(&token, kind, search).await;
        self.gate.recover(result).await
    }
}
