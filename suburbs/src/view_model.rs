//! State of one map view: loaded dataset, search query, filtered dataset and open popups.
//!
//! A view-model lives exactly as long as the map view is shown. It is created when the view is
//! entered, receives the dataset once the load finishes and is dropped when the user navigates
//! back, together with everything it holds.

use crate::bounds::GeoBounds;
use crate::dataset::Dataset;
use crate::error::LoadError;
use crate::popup::PopupContent;
use crate::record::AttributeKeys;
use crate::search;
use crate::viewport::ViewportHandle;

/// Text of the notice shown when a search matches nothing.
pub const NO_MATCHES_NOTICE: &str = "No matching suburbs found.";

/// Progress of the one-shot dataset load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The load has not finished yet.
    Pending,
    /// The dataset was loaded.
    Loaded,
    /// The load failed. The map stays empty.
    Failed,
}

/// Result of a search action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// At least one record matched. The filtered dataset was replaced and the viewport was fit
    /// to the first match.
    Focused {
        /// Number of matching records.
        matches: usize,
        /// Bounds of the first match the viewport was fit to.
        bounds: Option<GeoBounds>,
    },
    /// Nothing matched. The notice is shown, nothing else changed.
    NoMatches,
    /// There is no live map to move. Nothing changed.
    ViewportUnavailable,
}

/// View-local state of the map view.
#[derive(Debug)]
pub struct MapViewModel {
    keys: AttributeKeys,
    full: Dataset,
    filtered: Dataset,
    load_state: LoadState,
    query: String,
    notice: Option<&'static str>,
    notices_shown: usize,
    popup: Option<PopupContent>,
    revision: u64,
}

impl MapViewModel {
    /// Creates an empty view-model waiting for the dataset.
    pub fn new(keys: AttributeKeys) -> Self {
        Self {
            keys,
            full: Dataset::default(),
            filtered: Dataset::default(),
            load_state: LoadState::Pending,
            query: String::new(),
            notice: None,
            notices_shown: 0,
            popup: None,
            revision: 0,
        }
    }

    /// Stores the result of the dataset load. On success both the full and the filtered
    /// datasets become the loaded one; on failure the error is logged and both stay empty.
    pub fn finish_load(&mut self, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => {
                log::info!("Loaded {} suburbs", dataset.len());
                self.filtered = dataset.clone();
                self.full = dataset;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                log::error!("Error loading suburbs: {err}");
                self.full = Dataset::default();
                self.filtered = Dataset::default();
                self.load_state = LoadState::Failed;
            }
        }

        self.revision += 1;
    }

    /// Runs the search for the current query. A search that finds suburbs replaces the drawn
    /// set and closes the open popup.
    pub fn search(&mut self, viewport: Option<&mut dyn ViewportHandle>) -> SearchOutcome {
        let Some(viewport) = viewport else {
            log::warn!("Map viewport is not available, search for {:?} skipped", self.query);
            return SearchOutcome::ViewportUnavailable;
        };

        let matches = search::filter(&self.full, &self.query, &self.keys);
        let Some(first) = matches.first() else {
            log::info!("No suburbs match {:?}", self.query);
            self.notice = Some(NO_MATCHES_NOTICE);
            self.notices_shown += 1;
            return SearchOutcome::NoMatches;
        };

        let bounds = first.bounds();
        match &bounds {
            Some(bounds) => viewport.fit_bounds(bounds),
            None => log::warn!("First match for {:?} has no geometry", self.query),
        }

        let count = matches.len();
        log::debug!("{count} suburbs match {:?}", self.query);
        self.filtered = matches;
        self.popup = None;
        self.revision += 1;

        SearchOutcome::Focused {
            matches: count,
            bounds,
        }
    }

    /// Sets the query and runs the search.
    pub fn search_for(
        &mut self,
        query: impl Into<String>,
        viewport: Option<&mut dyn ViewportHandle>,
    ) -> SearchOutcome {
        self.query = query.into();
        self.search(viewport)
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Mutable query text, for binding to a text input.
    pub fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    /// Replaces the query text without searching.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// All loaded records.
    pub fn full(&self) -> &Dataset {
        &self.full
    }

    /// Records currently drawn on the map.
    pub fn filtered(&self) -> &Dataset {
        &self.filtered
    }

    /// Progress of the dataset load.
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Counter that changes every time the filtered dataset is replaced. The overlay is rebuilt
    /// whenever it differs from the value used for the last build.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Notice waiting to be shown to the user.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Number of times a notice was raised since the view was created.
    pub fn notices_shown(&self) -> usize {
        self.notices_shown
    }

    /// Closes the notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Opens the popup of the top-most visible suburb under the point. Clicking outside every
    /// suburb closes the current popup. Returns the opened popup.
    pub fn open_popup_at(&mut self, lon: f64, lat: f64) -> Option<&PopupContent> {
        self.popup = self
            .filtered
            .records_at(lon, lat)
            .next()
            .map(|record| PopupContent::from_record(record, &self.keys));
        self.popup.as_ref()
    }

    /// Currently open popup.
    pub fn popup(&self) -> Option<&PopupContent> {
        self.popup.as_ref()
    }

    /// Closes the popup.
    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// Attribute keys used by this view.
    pub fn keys(&self) -> &AttributeKeys {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::viewport::{MapPosition, Viewport};

    #[derive(Default)]
    struct RecordingViewport {
        fits: Vec<GeoBounds>,
    }

    impl ViewportHandle for RecordingViewport {
        fn viewport(&self) -> Viewport {
            Viewport::with_z_level(MapPosition::new(-33.8688, 151.2093), 10)
        }

        fn fit_bounds(&mut self, bounds: &GeoBounds) {
            self.fits.push(*bounds);
        }
    }

    fn feature(name: &str, lon: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": { "nsw_loca_2": name },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [lon, -33.9], [lon + 0.01, -33.9], [lon + 0.01, -33.89], [lon, -33.89], [lon, -33.9]
                ]]
            }
        })
    }

    fn scenario_dataset() -> Dataset {
        Dataset::from_geojson_str(
            &json!({
                "type": "FeatureCollection",
                "features": [
                    feature("Bondi", 151.27),
                    feature("Bondi Junction", 151.25),
                    feature("Manly", 151.28),
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    fn loaded() -> MapViewModel {
        let mut model = MapViewModel::new(AttributeKeys::default());
        model.finish_load(Ok(scenario_dataset()));
        model
    }

    fn names(dataset: &Dataset) -> Vec<String> {
        let keys = AttributeKeys::default();
        dataset
            .iter()
            .map(|r| r.name(&keys).unwrap().into_owned())
            .collect()
    }

    fn bondi_bounds() -> GeoBounds {
        GeoBounds::new(151.27, -33.9, 151.27 + 0.01, -33.89)
    }

    #[test]
    fn load_populates_both_datasets() {
        let model = loaded();
        assert_eq!(model.load_state(), LoadState::Loaded);
        assert_eq!(model.full().len(), 3);
        assert_eq!(names(model.filtered()), names(model.full()));
    }

    #[test]
    fn failed_load_leaves_map_empty() {
        let mut model = MapViewModel::new(AttributeKeys::default());
        let revision = model.revision();
        model.finish_load(Err(LoadError::NotFeatureCollection));

        assert_eq!(model.load_state(), LoadState::Failed);
        assert!(model.full().is_empty());
        assert!(model.filtered().is_empty());
        assert_ne!(model.revision(), revision);
    }

    #[test]
    fn search_bondi_focuses_first_match() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();

        let outcome = model.search_for("bondi", Some(&mut viewport));

        assert_eq!(
            outcome,
            SearchOutcome::Focused {
                matches: 2,
                bounds: Some(bondi_bounds())
            }
        );
        assert_eq!(names(model.filtered()), ["Bondi", "Bondi Junction"]);
        assert_eq!(viewport.fits, [bondi_bounds()]);
        assert_eq!(model.notice(), None);
        assert_eq!(model.notices_shown(), 0);
    }

    #[test]
    fn search_without_matches_shows_notice_once() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();
        model.search_for("bondi", Some(&mut viewport));
        let revision = model.revision();

        let outcome = model.search_for("xyz", Some(&mut viewport));

        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert_eq!(model.notice(), Some(NO_MATCHES_NOTICE));
        assert_eq!(model.notices_shown(), 1);
        assert_eq!(names(model.filtered()), ["Bondi", "Bondi Junction"]);
        assert_eq!(viewport.fits.len(), 1);
        assert_eq!(model.revision(), revision);

        model.dismiss_notice();
        assert_eq!(model.notice(), None);

        model.search_for("xyz", Some(&mut viewport));
        assert_eq!(model.notices_shown(), 2);
    }

    #[test]
    fn empty_query_resets_to_full_dataset() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();
        model.search_for("manly", Some(&mut viewport));
        assert_eq!(names(model.filtered()), ["Manly"]);

        let outcome = model.search_for("", Some(&mut viewport));

        assert_eq!(
            outcome,
            SearchOutcome::Focused {
                matches: 3,
                bounds: Some(bondi_bounds())
            }
        );
        assert_eq!(names(model.filtered()), ["Bondi", "Bondi Junction", "Manly"]);
        assert_eq!(viewport.fits.last(), Some(&bondi_bounds()));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut upper = loaded();
        let mut lower = loaded();
        let mut viewport = RecordingViewport::default();
        upper.search_for("BONDI", Some(&mut viewport));
        lower.search_for("bondi", Some(&mut viewport));
        assert_eq!(names(upper.filtered()), names(lower.filtered()));
    }

    #[test]
    fn unavailable_viewport_changes_nothing() {
        let mut model = loaded();
        let revision = model.revision();

        let outcome = model.search_for("xyz", None);

        assert_eq!(outcome, SearchOutcome::ViewportUnavailable);
        assert_eq!(model.notice(), None);
        assert_eq!(model.filtered().len(), 3);
        assert_eq!(model.revision(), revision);
    }

    #[test]
    fn search_before_load_shows_notice() {
        let mut model = MapViewModel::new(AttributeKeys::default());
        let mut viewport = RecordingViewport::default();
        assert_eq!(
            model.search_for("", Some(&mut viewport)),
            SearchOutcome::NoMatches
        );
        assert!(viewport.fits.is_empty());
    }

    #[test]
    fn filtered_is_always_subset_of_full() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();
        for query in ["b", "BONDI", "junction", "xyz", "", "m", "anly"] {
            model.search_for(query, Some(&mut viewport));
            assert!(model.filtered().is_subset_of(model.full()), "{query:?}");
        }
    }

    #[test]
    fn popup_only_for_visible_suburbs() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();

        let popup = model.open_popup_at(151.285, -33.895).cloned();
        assert_eq!(popup.map(|p| p.title), Some("Manly".to_string()));

        model.search_for("bondi", Some(&mut viewport));
        assert!(model.open_popup_at(151.285, -33.895).is_none());
        assert!(model.popup().is_none());

        let popup = model.open_popup_at(151.255, -33.895).cloned();
        assert_eq!(popup.map(|p| p.title), Some("Bondi Junction".to_string()));

        model.close_popup();
        assert!(model.popup().is_none());
    }
    #[test]
    fn focused_search_closes_popup() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();
        model.open_popup_at(151.285, -33.895);
        assert!(model.popup().is_some());

        model.search_for("bondi", Some(&mut viewport));
        assert!(model.popup().is_none());
    }

    #[test]
    fn search_without_matches_keeps_popup() {
        let mut model = loaded();
        let mut viewport = RecordingViewport::default();
        model.open_popup_at(151.285, -33.895);

        model.search_for("xyz", Some(&mut viewport));
        assert_eq!(model.popup().map(|p| p.title.as_str()), Some("Manly"));
    }
}
