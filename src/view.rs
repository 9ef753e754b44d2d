//! Declarative view descriptions and the in-memory page they are rendered into.
//!
//! Render functions return a [View] tree instead of touching a real document. The [Page] keeps its top-level elements
//! in document order, which is enough to express the placement rules the controller relies on (e.g. "immediately
//! after the triggering control") and to test them without a browser.

/// Element ID of the artist selection panel. At most one element with this ID exists in a page.
pub const SELECTION_PANEL_ID: &str = "artist-selection";
/// Element ID of the free-text input for additional artists inside the selection panel.
pub const ADDITIONAL_ARTISTS_INPUT_ID: &str = "additional-artists";
/// Element ID of the confirm button inside the selection panel.
pub const CREATE_PLAYLIST_BUTTON_ID: &str = "create-artist-playlist";
/// Form field name shared by the artist checkboxes.
pub const ARTIST_CHECKBOX_NAME: &str = "include_artists";

pub const SELECTION_PANEL_HEADING: &str = "Select associated artists:";
pub const NO_ASSOCIATED_ARTISTS_NOTICE: &str = "No associated artists found.";
const ADDITIONAL_ARTISTS_PLACEHOLDER: &str = "Additional artists, comma separated";
const CREATE_PLAYLIST_LABEL: &str = "Create Playlist";

/// A description of a piece of UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Container { id: Option<String>, children: Vec<View> },
    Text(String),
    Checkbox { name: String, value: String, checked: bool },
    TextInput { id: String, placeholder: String, value: String },
    Button { id: String, label: String },
}

/// A top-level element in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: String,
    view: View,
}

/// The page the controller renders into: its top-level elements in document order, the status line, and the location
/// the page has been navigated to, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page {
    elements: Vec<Element>,
    status: Option<String>,
    location: Option<String>,
}

impl View {
    pub fn container<I>(id: Option<&str>, children: I) -> Self
    where
        I: IntoIterator<Item = View>,
    {
        Self::Container {
            id: id.map(str::to_owned),
            children: children.into_iter().collect(),
        }
    }

    pub fn text<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        Self::Text(text.into())
    }

    pub fn button<S>(id: &str, label: S) -> Self
    where
        S: Into<String>,
    {
        Self::Button {
            id: id.to_owned(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Container { id, .. } => id.as_deref(),
            Self::TextInput { id, .. } | Self::Button { id, .. } => Some(id),
            Self::Text(_) | Self::Checkbox { .. } => None,
        }
    }

    pub fn children(&self) -> &[View] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a View)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut View)) {
        visit(&mut *self);
        if let Self::Container { children, .. } = self {
            for child in children {
                child.walk_mut(visit);
            }
        }
    }

    /// Values of all checked checkboxes, in document order.
    pub fn checked_values(&self) -> Vec<String> {
        let mut values = Vec::new();
        self.walk(&mut |view| {
            if let Self::Checkbox { value, checked: true, .. } = view {
                values.push(value.clone());
            }
        });

        values
    }

    /// Values of all checkboxes regardless of their state, in document order.
    pub fn checkbox_values(&self) -> Vec<&str> {
        let mut values = Vec::new();
        self.walk(&mut |view| {
            if let Self::Checkbox { value, .. } = view {
                values.push(value.as_str());
            }
        });

        values
    }

    /// Sets the state of every checkbox with the given value. Returns how many checkboxes matched.
    pub fn set_checked(&mut self, target: &str, state: bool) -> usize {
        let mut matched = 0;
        self.walk_mut(&mut |view| {
            if let Self::Checkbox { value, checked, .. } = view {
                if value.as_str() == target {
                    *checked = state;
                    matched += 1;
                }
            }
        });

        matched
    }

    /// The value of the text input with the given ID.
    pub fn input_value(&self, input_id: &str) -> Option<&str> {
        let mut found = None;
        self.walk(&mut |view| {
            if let Self::TextInput { id, value, .. } = view {
                if id == input_id && found.is_none() {
                    found = Some(value.as_str());
                }
            }
        });

        found
    }

    /// Replaces the value of the text input with the given ID. Returns false if there is no such input.
    pub fn set_input_value(&mut self, input_id: &str, new_value: &str) -> bool {
        let mut found = false;
        self.walk_mut(&mut |view| {
            if let Self::TextInput { id, value, .. } = view {
                if id.as_str() == input_id {
                    *value = new_value.to_owned();
                    found = true;
                }
            }
        });

        found
    }

    /// Whether the view contains the given text node anywhere.
    pub fn contains_text(&self, needle: &str) -> bool {
        let mut found = false;
        self.walk(&mut |view| {
            if let Self::Text(text) = view {
                found |= text == needle;
            }
        });

        found
    }
}

/// Renders the artist selection panel: a checkbox per artist (or a notice when there are none), a text input for
/// additional artists and the confirm button.
pub fn artist_selection_panel(artists: &[String]) -> View {
    let mut children = vec![View::text(SELECTION_PANEL_HEADING)];

    if artists.is_empty() {
        children.push(View::text(NO_ASSOCIATED_ARTISTS_NOTICE));
    } else {
        children.extend(artists.iter().map(|artist| View::Checkbox {
            name: ARTIST_CHECKBOX_NAME.to_owned(),
            value: artist.clone(),
            checked: false,
        }));
    }

    children.push(View::TextInput {
        id: ADDITIONAL_ARTISTS_INPUT_ID.to_owned(),
        placeholder: ADDITIONAL_ARTISTS_PLACEHOLDER.to_owned(),
        value: String::new(),
    });
    children.push(View::button(CREATE_PLAYLIST_BUTTON_ID, CREATE_PLAYLIST_LABEL));

    View::container(Some(SELECTION_PANEL_ID), children)
}

impl Element {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn view(&self) -> &View {
        &self.view
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element at the end of the page.
    pub fn append<S>(&mut self, id: S, view: View)
    where
        S: Into<String>,
    {
        self.elements.push(Element { id: id.into(), view });
    }

    /// Inserts an element as the immediate next sibling of `anchor`. Returns false, without inserting anything, if
    /// `anchor` isn't in the page.
    pub fn insert_after<S>(&mut self, anchor: &str, id: S, view: View) -> bool
    where
        S: Into<String>,
    {
        match self.position(anchor) {
            Some(index) => {
                self.elements.insert(index + 1, Element { id: id.into(), view });
                true
            }

            None => false,
        }
    }

    /// Removes every element with the given ID and returns the first one removed.
    pub fn remove(&mut self, id: &str) -> Option<View> {
        let mut removed = None;
        self.elements.retain_mut(|element| {
            if element.id != id {
                return true;
            }

            if removed.is_none() {
                removed = Some(std::mem::replace(&mut element.view, View::Text(String::new())));
            }

            false
        });

        removed
    }

    pub fn get(&self, id: &str) -> Option<&View> {
        self.elements.iter().find(|element| element.id == id).map(|element| &element.view)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut View> {
        self.elements
            .iter_mut()
            .find(|element| element.id == id)
            .map(|element| &mut element.view)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.id == id)
    }

    /// The element immediately after the one with the given ID.
    pub fn next_sibling(&self, id: &str) -> Option<&Element> {
        self.position(id).and_then(|index| self.elements.get(index + 1))
    }

    /// How many top-level elements have the given ID.
    pub fn count(&self, id: &str) -> usize {
        self.elements.iter().filter(|element| element.id == id).count()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status<S>(&mut self, status: S)
    where
        S: Into<String>,
    {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// The URL the page has navigated to, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn navigate<S>(&mut self, url: S)
    where
        S: Into<String>,
    {
        self.location = Some(url.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_controls() -> Page {
        let mut page = Page::new();
        page.append("credentials-form", View::container(None, []));
        page.append("artist-playlist-button", View::button("artist-playlist-button", "Artist Playlist"));
        page.append("status", View::text(""));
        page
    }

    #[test]
    fn panel_lists_artists_in_order() {
        let artists = vec!["Bonobo".to_owned(), "Caribou".to_owned()];
        let panel = artist_selection_panel(&artists);

        assert_eq!(panel.id(), Some(SELECTION_PANEL_ID));
        assert_eq!(panel.checkbox_values(), ["Bonobo", "Caribou"]);
        assert!(!panel.contains_text(NO_ASSOCIATED_ARTISTS_NOTICE));
        assert_eq!(panel.input_value(ADDITIONAL_ARTISTS_INPUT_ID), Some(""));
    }

    #[test]
    fn empty_panel_shows_notice() {
        let panel = artist_selection_panel(&[]);

        assert!(panel.checkbox_values().is_empty());
        assert!(panel.contains_text(NO_ASSOCIATED_ARTISTS_NOTICE));
        assert!(panel.input_value(ADDITIONAL_ARTISTS_INPUT_ID).is_some());
    }

    #[test]
    fn checking_and_typing() {
        let mut panel = artist_selection_panel(&["A".to_owned(), "B".to_owned()]);

        assert_eq!(panel.set_checked("B", true), 1);
        assert_eq!(panel.set_checked("missing", true), 0);
        assert!(panel.set_input_value(ADDITIONAL_ARTISTS_INPUT_ID, "C, D"));

        assert_eq!(panel.checked_values(), ["B"]);
        assert_eq!(panel.input_value(ADDITIONAL_ARTISTS_INPUT_ID), Some("C, D"));
    }

    #[test]
    fn insert_after_places_next_sibling() {
        let mut page = page_with_controls();

        assert!(page.insert_after("artist-playlist-button", SELECTION_PANEL_ID, artist_selection_panel(&[])));
        assert_eq!(
            page.next_sibling("artist-playlist-button").map(Element::id),
            Some(SELECTION_PANEL_ID)
        );
        assert_eq!(page.elements().last().map(Element::id), Some("status"));
    }

    #[test]
    fn insert_after_missing_anchor() {
        let mut page = page_with_controls();

        assert!(!page.insert_after("nowhere", SELECTION_PANEL_ID, artist_selection_panel(&[])));
        assert_eq!(page.count(SELECTION_PANEL_ID), 0);
    }

    #[test]
    fn remove_takes_every_duplicate() {
        let mut page = page_with_controls();
        page.append(SELECTION_PANEL_ID, artist_selection_panel(&[]));
        page.append(SELECTION_PANEL_ID, artist_selection_panel(&[]));

        assert!(page.remove(SELECTION_PANEL_ID).is_some());
        assert_eq!(page.count(SELECTION_PANEL_ID), 0);
        assert!(page.remove(SELECTION_PANEL_ID).is_none());
    }
}
