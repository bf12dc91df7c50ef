//! # Cinelist Core
//!
//! Client-side state for the cinelist movie catalog: the remote movie
//! store, the lists a page shows, and the manager that keeps those lists
//! consistent with the store when a viewer toggles a favorite.
//!
//! ## Overview
//!
//! - **Store**: [`store::MovieStore`] is the port to the `/movies`
//!   resource, with an HTTP adapter and an in-memory adapter
//! - **Collections**: [`collections::FilteredMovieCollections`] holds the
//!   trending, favorites and continue-watching lists of one page
//! - **Manager**: [`manager::ListConsistencyManager`] runs optimistic
//!   toggles with rollback, category filters, detail and form flows
//! - **Presentation**: [`presenter::Presenter`] receives renders and alerts;
//!   [`events::UiEvent`] carries interactions back in
//!
//! ## Examples
//!
//! ```no_run
//! use cinelist_config::ConfigLoader;
//! use cinelist_core::{
//!     CollectionKey, HttpMovieStore, ListConsistencyManager, ManagerConfig,
//!     PageContext, RecordingPresenter,
//! };
//! use cinelist_model::MovieId;
//!
//! async fn favorite_first_trending() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load()?.config;
//!     let store = HttpMovieStore::from_config(&config)?;
//!     let mut manager = ListConsistencyManager::new(
//!         store,
//!         RecordingPresenter::new(),
//!         ManagerConfig::from(&config),
//!     );
//!
//!     manager.load_page(PageContext::Trending).await;
//!     manager
//!         .toggle_favorite(&MovieId::from(7), CollectionKey::Trending)
//!         .await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Per-page movie lists
pub mod collections;

/// API resource names, routes and alert texts
pub mod constants;

/// Error types surfaced by the manager
pub mod error;

/// Presentation events and their outcomes
pub mod events;

/// The list-consistency manager
pub mod manager;

pub mod page;

/// Presentation port and a recording implementation
pub mod presenter;

/// Remote movie store port and adapters
pub mod store;

pub use collections::{CollectionKey, FilteredMovieCollections};
pub use error::{CatalogError, CatalogResult};
pub use events::{EventOutcome, UiEvent};
pub use manager::{ListConsistencyManager, ManagerConfig, PageLoad};
pub use page::PageContext;
pub use presenter::{Presenter, RecordingPresenter};
pub use store::{
    HttpMovieStore, InMemoryMovieStore, MovieFilter, MovieQuery, MovieStore,
    StoreError, StoreResult,
};
