use serde::Deserialize;

pub const APP_ID: &str = "com.toasterrepair.LedPortfolio";
pub const APP_NAME: &str = "led-portfolio";
pub const DEFAULT_DATA_PATH: &str = "projects.csv";

/// CartoDB Positron, a light neutral basemap.
pub const POSITRON_TILE_URL: &str = "https://a.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png";

/// Column headers the input file must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Project Name",
    "Category",
    "Screen Size",
    "Image URL",
    "Latitude",
    "Longitude",
];

/// One row of the projects file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProjectRecord {
    #[serde(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Screen Size")]
    pub screen_size: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// An ordered, immutable collection of project rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<ProjectRecord>,
    skipped_rows: usize,
}

impl Table {
    pub fn new(rows: Vec<ProjectRecord>) -> Self {
        Self { rows, skipped_rows: 0 }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_skipped(mut self, skipped_rows: usize) -> Self {
        self.skipped_rows = skipped_rows;
        self
    }

    pub fn rows(&self) -> &[ProjectRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows dropped at load time because their coordinates did not parse.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRecord> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a ProjectRecord;
    type IntoIter = std::slice::Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<ProjectRecord> for Table {
    fn from_iter<I: IntoIterator<Item = ProjectRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) fn project(name: &str, category: &str, latitude: f64, longitude: f64) -> ProjectRecord {
    ProjectRecord {
        project_name: name.to_string(),
        category: category.to_string(),
        screen_size: "10m x 4m".to_string(),
        image_url: format!("https://img.example.com/{}.jpg", name.to_lowercase()),
        latitude,
        longitude,
    }
}
