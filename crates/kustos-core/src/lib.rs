//! Kustos Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Kustos, a
//! manager for the application tree of a GitOps repository: every app is
//! one shared kustomize base plus one overlay per project, all persisted
//! as plain files under `apps/`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           kustos-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (InstallService, prune/infer/list)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │    (Driven: RepoFs, ManifestRenderer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kustos-adapters (Infrastructure)    │
//! │  (LocalRepoFs, MemoryRepoFs, Flatten)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (AppDescriptor, Kustomization, layout) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! # struct NoopRenderer;
//! # impl kustos_core::application::ports::ManifestRenderer for NoopRenderer {
//! #     fn render(
//! #         &self,
//! #         _: &kustos_core::domain::Kustomization,
//! #     ) -> kustos_core::error::KustosResult<Vec<u8>> {
//! #         Ok(Vec::new())
//! #     }
//! # }
//! # fn run(
//! #     repofs: &dyn kustos_core::application::ports::RepoFs,
//! # ) -> kustos_core::error::KustosResult<()> {
//! use kustos_core::{application::InstallService, domain::CreateOptions};
//!
//! // 1. Describe the installation
//! let opts = CreateOptions {
//!     app_specifier: "github.com/owner/repo/manifests?ref=v1.2.3".into(),
//!     app_name: "billing".into(),
//!     ..Default::default()
//! };
//!
//! // 2. Install through the service (adapters injected at the edge)
//! let service = InstallService::new(Box::new(NoopRenderer));
//! let app = service.describe(&opts, "prod", "https://github.com/owner/gitops", "main")?;
//! service.materialize(repofs, &app, "prod")?;
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InstallService, InstalledApp, delete_from_project, infer_app_type, list_apps,
        ports::{ManifestRenderer, RepoFs},
    };
    pub use crate::domain::{
        AppDescriptor, AppMetadata, AppType, BaseMatching, CreateOptions, InstallationMode,
        Kustomization, Namespace, generate_namespace, layout,
    };
    pub use crate::error::{KustosError, KustosResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
