//! Place-name gazetteer for outbreak requests.
//!
//! Resolves a human place name ("Berlin") to the grid cell it falls in,
//! so a caller can start an outbreak by name instead of coordinates.
//! Geographic positions are projected with a plain equirectangular
//! projection over the whole grid.

use indexmap::IndexMap;

use crate::id::CellCoord;

/// Anything that can turn a place name into a grid cell.
pub trait PlaceResolver {
    /// Resolve `name`, or `None` if it is unknown or off-grid.
    fn resolve(&self, name: &str) -> Option<CellCoord>;
}

/// A named location with geographic coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    /// Display name, possibly with non-ASCII characters.
    pub name: String,
    /// ASCII transliteration used as a lookup fallback.
    pub ascii_name: String,
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
    /// Population, if known.
    pub population: Option<f64>,
}

/// Project a latitude/longitude onto a `width x height` grid.
///
/// Returns `None` when the projected cell falls outside the grid
/// (e.g. `lon = 180` lands one past the last column).
pub fn project_equirectangular(lat: f64, lon: f64, width: u32, height: u32) -> Option<CellCoord> {
    let x = ((lon + 180.0) / 360.0 * f64::from(width)).floor();
    let y = ((90.0 - lat) / 180.0 * f64::from(height)).floor();
    if x < 0.0 || y < 0.0 || x >= f64::from(width) || y >= f64::from(height) {
        return None;
    }
    Some(CellCoord::new(x as u32, y as u32))
}

/// An in-memory gazetteer bound to one grid size.
///
/// Lookups are case-insensitive. The primary name is tried first, then
/// the ASCII alias. When two places share a name the first one inserted
/// wins.
#[derive(Clone, Debug)]
pub struct PlaceTable {
    width: u32,
    height: u32,
    places: Vec<Place>,
    by_name: IndexMap<String, usize>,
    by_ascii: IndexMap<String, usize>,
}

impl PlaceTable {
    /// An empty table projecting onto a `width x height` grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            places: Vec::new(),
            by_name: IndexMap::new(),
            by_ascii: IndexMap::new(),
        }
    }

    /// Add a place. Earlier entries shadow later ones with the same name.
    pub fn insert(&mut self, place: Place) {
        let idx = self.places.len();
        self.by_name
            .entry(place.name.to_lowercase())
            .or_insert(idx);
        self.by_ascii
            .entry(place.ascii_name.to_lowercase())
            .or_insert(idx);
        self.places.push(place);
    }

    /// Number of places held.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the table holds no places.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Look up the place record for `name`.
    pub fn get(&self, name: &str) -> Option<&Place> {
        let key = name.trim().to_lowercase();
        self.by_name
            .get(&key)
            .or_else(|| self.by_ascii.get(&key))
            .map(|&idx| &self.places[idx])
    }
}

impl Extend<Place> for PlaceTable {
    fn extend<T: IntoIterator<Item = Place>>(&mut self, iter: T) {
        for place in iter {
            self.insert(place);
        }
    }
}

impl PlaceResolver for PlaceTable {
    fn resolve(&self, name: &str) -> Option<CellCoord> {
        let place = self.get(name)?;
        project_equirectangular(place.lat, place.lon, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, ascii: &str, lat: f64, lon: f64) -> Place {
        Place {
            name: name.into(),
            ascii_name: ascii.into(),
            lat,
            lon,
            population: None,
        }
    }

    #[test]
    fn projection_corners() {
        assert_eq!(
            project_equirectangular(90.0, -180.0, 360, 180),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(
            project_equirectangular(0.0, 0.0, 360, 180),
            Some(CellCoord::new(180, 90))
        );
        assert_eq!(project_equirectangular(0.0, 180.0, 360, 180), None);
        assert_eq!(project_equirectangular(-90.0, 0.0, 360, 180), None);
    }

    #[test]
    fn lookup_is_case_insensitive_with_ascii_fallback() {
        let mut table = PlaceTable::new(1280, 720);
        table.insert(place("São Paulo", "Sao Paulo", -23.55, -46.63));
        table.insert(place("Berlin", "Berlin", 52.52, 13.40));

        assert_eq!(table.get("BERLIN").unwrap().name, "Berlin");
        assert_eq!(table.get("sao paulo").unwrap().name, "São Paulo");
        assert!(table.get("Atlantis").is_none());

        let cell = table.resolve("Berlin").unwrap();
        assert_eq!(cell, CellCoord::new(687, 149));
    }

    #[test]
    fn first_insert_wins() {
        let mut table = PlaceTable::new(360, 180);
        table.extend([
            place("Springfield", "Springfield", 39.8, -89.6),
            place("Springfield", "Springfield", 42.1, -72.6),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("springfield").unwrap().lat, 39.8);
    }
}
