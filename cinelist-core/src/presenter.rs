//! The presentation port.
//!
//! The manager never draws anything itself. It hands its collections,
//! detail records and form state to a [`Presenter`], and reports every
//! user-visible failure through [`Presenter::alert`].

use cinelist_model::{Movie, MovieId};

use crate::collections::{CollectionKey, FilteredMovieCollections};
use crate::error::CatalogError;
use crate::page::PageContext;

pub trait Presenter: Send {
    /// Draws every list `page` shows.
    fn render(&mut self, page: PageContext, collections: &FilteredMovieCollections);

    fn show_detail(&mut self, movie: &Movie);

    /// Opens the movie form, prefilled when editing.
    fn open_form(&mut self, movie: Option<&Movie>);

    fn close_form(&mut self);

    fn alert(&mut self, error: &CatalogError);
}

/// Snapshot of one list at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedList {
    pub key: CollectionKey,
    pub movies: Vec<Movie>,
}

impl RenderedList {
    pub fn ids(&self) -> Vec<MovieId> {
        self.movies.iter().filter_map(|m| m.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    Render {
        page: PageContext,
        lists: Vec<RenderedList>,
    },
    ShowDetail(Movie),
    OpenForm(Option<Movie>),
    CloseForm,
    Alert(String),
}

/// [`Presenter`] that records every call, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PresenterCall::Render { .. }))
            .count()
    }

    /// Lists drawn by the most recent render.
    pub fn last_render(&self) -> Option<&[RenderedList]> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Render { lists, .. } => Some(lists.as_slice()),
            _ => None,
        })
    }

    pub fn last_rendered(&self, key: CollectionKey) -> Option<&RenderedList> {
        self.last_render()?.iter().find(|list| list.key == key)
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_detail(&self) -> Option<&Movie> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::ShowDetail(movie) => Some(movie),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, page: PageContext, collections: &FilteredMovieCollections) {
        let lists = page
            .collections()
            .iter()
            .map(|key| RenderedList {
                key: *key,
                movies: collections.iter(*key).cloned().collect(),
            })
            .collect();
        self.calls.push(PresenterCall::Render { page, lists });
    }

    fn show_detail(&mut self, movie: &Movie) {
        self.calls.push(PresenterCall::ShowDetail(movie.clone()));
    }

    fn open_form(&mut self, movie: Option<&Movie>) {
        self.calls.push(PresenterCall::OpenForm(movie.cloned()));
    }

    fn close_form(&mut self) {
        self.calls.push(PresenterCall::CloseForm);
    }

    fn alert(&mut self, error: &CatalogError) {
        self.calls.push(PresenterCall::Alert(error.to_string()));
    }
}
