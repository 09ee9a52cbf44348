// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Kustos.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O and rendering concerns are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde
//! - **Immutable values**: All domain objects are Clone, most PartialEq
//! - **Tree as truth**: no in-memory cache of the apps tree exists anywhere;
//!   the filesystem is re-read before every decision

// Public API - what the world sees
pub mod app;
pub mod app_type;
pub mod error;
pub mod kube;
pub mod kustomization;
pub mod layout;
pub mod metadata;

// Re-exports for convenience
pub use app::{AppDescriptor, CreateOptions, InstallationMode, validate_create};
pub use app_type::AppType;
pub use error::{DomainError, ErrorCategory};
pub use kube::{Namespace, ObjectMeta, generate_namespace};
pub use kustomization::{BaseMatching, Kustomization};
pub use metadata::AppMetadata;
