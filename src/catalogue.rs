// src/catalogue.rs
//! The fixed list of map features. Authoritative for *which* features exist;
//! the scrape only ever supplies their state.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{ Arc, OnceLock };

use crate::csv::parse_rows;
use crate::error::CatalogueError;
use crate::model::{ CatalogueFeature, Coordinate, DifficultyTier, FeatureKind };

const BUILTIN_CSV: &str = include_str!("../assets/catalogue.csv");

const COLUMNS: [&str; 6] = ["side", "full_name", "kind", "difficulty", "x", "y"];

#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    features: Vec<CatalogueFeature>,
}

impl Catalogue {
    /// Feature names must be unique; order is kept.
    pub fn new(features: Vec<CatalogueFeature>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::with_capacity(features.len());
        for f in &features {
            if !seen.insert(f.full_name.as_str()) {
                return Err(CatalogueError::Duplicate(f.full_name.clone()));
            }
        }
        Ok(Self { features })
    }

    /// The catalogue embedded in the binary, parsed on first use.
    pub fn builtin() -> Arc<Catalogue> {
        static BUILTIN: OnceLock<Arc<Catalogue>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Arc::new(Catalogue::from_csv(BUILTIN_CSV).expect("embedded catalogue is valid"))
            })
            .clone()
    }

    pub fn load(path: &Path) -> Result<Catalogue, CatalogueError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogueError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cat = Catalogue::from_csv(&text)?;
        logf!("Catalogue: loaded {} features from {}", cat.len(), path.display());
        Ok(cat)
    }

    /// Parse `side,full_name,kind,difficulty,x,y` (header required, any column
    /// order). Lines starting with `#` are comments.
    pub fn from_csv(text: &str) -> Result<Catalogue, CatalogueError> {
        let mut rows = parse_rows(text, ',')
            .into_iter()
            .filter(|r| !r.first().is_some_and(|c| c.trim_start().starts_with('#')));

        let header = rows.next().unwrap_or_default();
        let mut idx = [0usize; COLUMNS.len()];
        for (slot, col) in idx.iter_mut().zip(COLUMNS) {
            *slot = header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(col))
                .ok_or(CatalogueError::MissingColumn(col))?;
        }
        let [c_side, c_name, c_kind, c_diff, c_x, c_y] = idx;

        let mut features = Vec::new();
        for (i, row) in rows.enumerate() {
            let n = i + 1;
            let cell = |at: usize| row.get(at).map(|c| c.trim()).unwrap_or("");
            let bad = |message: String| CatalogueError::Row { row: n, message };

            let name = cell(c_name);
            if name.is_empty() {
                return Err(bad(s!("empty full_name")));
            }
            let kind: FeatureKind = cell(c_kind).parse().map_err(bad)?;
            let difficulty = match cell(c_diff) {
                "" => None,
                d => Some(d.parse::<DifficultyTier>().map_err(bad)?),
            };
            let coord = |at: usize, axis: &str| {
                cell(at).parse::<f32>()
                    .map_err(|e| bad(format!("{axis} `{}`: {e}", cell(at))))
            };

            features.push(CatalogueFeature {
                side: s!(cell(c_side)),
                full_name: s!(name),
                kind,
                difficulty,
                coordinate: Coordinate { x: coord(c_x, "x")?, y: coord(c_y, "y")? },
            });
        }

        Catalogue::new(features)
    }

    pub fn features(&self) -> &[CatalogueFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, full_name: &str) -> Option<&CatalogueFeature> {
        self.features.iter().find(|f| f.full_name == full_name)
    }

    /// Side names in first-seen order.
    pub fn sides(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for f in &self.features {
            if !out.contains(&f.side.as_str()) {
                out.push(&f.side);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogue_parses() {
        let cat = Catalogue::builtin();
        assert!(!cat.is_empty());
        assert_eq!(cat.sides(), vec!["Geilolia", "Vestlia"]);
        let lift = cat.get("B-Fugleleiken").unwrap();
        assert_eq!(lift.kind, FeatureKind::Lift);
        assert_eq!(lift.difficulty, None);
        let slope = cat.get("11-Ølkorken").unwrap();
        assert_eq!(slope.kind, FeatureKind::Slope);
        assert_eq!(slope.difficulty, Some(DifficultyTier::Black));
    }

    #[test]
    fn columns_in_any_order_and_comments() {
        let text = "# exported from the map editor\n\
                    kind,x,y,full_name,side,difficulty\n\
                    slope,10.5,20,3-Bakken,Nord,Blue\n";
        let cat = Catalogue::from_csv(text).unwrap();
        let f = &cat.features()[0];
        assert_eq!(f.full_name, "3-Bakken");
        assert_eq!(f.side, "Nord");
        assert_eq!(f.difficulty, Some(DifficultyTier::Blue));
        assert_eq!(f.coordinate, Coordinate { x: 10.5, y: 20.0 });
    }

    #[test]
    fn missing_column_is_reported() {
        let err = Catalogue::from_csv("side,full_name,kind,x,y\n").unwrap_err();
        assert!(matches!(err, CatalogueError::MissingColumn("difficulty")));
    }

    #[test]
    fn bad_rows_are_reported_with_row_number() {
        let text = "side,full_name,kind,difficulty,x,y\n\
                    A,1-Ok,slope,green,1,1\n\
                    A,2-Bad,gondola,,1,1\n";
        let err = Catalogue::from_csv(text).unwrap_err();
        assert!(matches!(err, CatalogueError::Row { row: 2, .. }));

        let text = "side,full_name,kind,difficulty,x,y\nA,1-Ok,slope,,left,1\n";
        assert!(Catalogue::from_csv(text).unwrap_err().to_string().contains("left"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let text = "side,full_name,kind,difficulty,x,y\n\
                    A,B-Lift,lift,,1,1\n\
                    B,B-Lift,lift,,2,2\n";
        assert!(matches!(Catalogue::from_csv(text), Err(CatalogueError::Duplicate(n)) if n == "B-Lift"));
    }

    #[test]
    fn load_reports_path() {
        let err = Catalogue::load(Path::new("/no/such/catalogue.csv")).unwrap_err();
        assert!(err.to_string().contains("/no/such/catalogue.csv"));
    }
}
