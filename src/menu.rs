//! Menu data model: rows, stable row identifiers and the loaded dataset.
//!
//! A [`Dataset`] is built once per load from the rows an external loader
//! deserialized. It assigns every row a [`RowId`] equal to its load-order
//! sequence number. Views, filters and the selection tracker refer to rows
//! only through these ids, so an id keeps naming the same row however the
//! visible subset is filtered or sorted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::index::NameIndex;

/// Stable identifier of a row within one loaded [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    /// The row's sequence number in load order.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the nutrient columns that can be summed, filtered or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    /// Energy in kcal.
    Calories,
    /// Protein in grams.
    Protein,
    /// Fat in grams.
    Fat,
    /// Carbohydrate in grams.
    Carbs,
}

impl Nutrient {
    /// All nutrients in display order.
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
    ];
}

impl FromStr for Nutrient {
    type Err = Error;

    /// Parse a nutrient from its English name or the Japanese column header
    /// used by the menu spreadsheets.
    ///
    /// # Examples
    ///
    /// ```
    /// use menufinder::Nutrient;
    ///
    /// assert_eq!("protein".parse::<Nutrient>().unwrap(), Nutrient::Protein);
    /// assert_eq!("脂質 (g)".parse::<Nutrient>().unwrap(), Nutrient::Fat);
    /// assert!("sodium".parse::<Nutrient>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calories" | "kcal" | "カロリー" | "エネルギー" | "カロリー (kcal)" => {
                Ok(Nutrient::Calories)
            }
            "protein" | "protein_grams" | "たんぱく質" | "たんぱく質 (g)" => Ok(Nutrient::Protein),
            "fat" | "fat_grams" | "脂質" | "脂質 (g)" => Ok(Nutrient::Fat),
            "carbs" | "carb_grams" | "carbohydrate" | "炭水化物" | "炭水化物 (g)" => {
                Ok(Nutrient::Carbs)
            }
            _ => Err(Error::UnknownNutrient(s.to_owned())),
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
        })
    }
}

/// Accept a number, a numeric string, null, or anything else; keep only
/// finite numbers.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(Raw::Other(_)) | None => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

fn lenient_calories<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

/// One menu item of one store.
///
/// Deserializes from either the English field names or the Japanese
/// spreadsheet headers. Nutrient values that are missing, empty or not
/// numeric become `None`; a missing calorie value becomes 0.
///
/// # Examples
///
/// ```
/// use menufinder::MenuRow;
///
/// let row: MenuRow = serde_json::from_str(r#"{
///     "店舗名": "マクドナルド",
///     "メニュー名": "ビッグマック",
///     "たんぱく質 (g)": 26.0,
///     "脂質 (g)": "28.3",
///     "炭水化物 (g)": "-"
/// }"#).unwrap();
///
/// assert_eq!(row.calories, 0.0);
/// assert_eq!(row.fat_grams, Some(28.3));
/// assert_eq!(row.carb_grams, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuRow {
    /// Store (chain) name.
    #[serde(alias = "店舗名")]
    pub store_name: String,

    /// Menu item name.
    #[serde(alias = "メニュー名")]
    pub item_name: String,

    /// Optional menu category.
    #[serde(default, alias = "カテゴリ", alias = "カテゴリー")]
    pub category: Option<String>,

    /// Energy in kcal; 0 when the source has no value.
    #[serde(
        default,
        deserialize_with = "lenient_calories",
        alias = "カロリー",
        alias = "カロリー (kcal)"
    )]
    pub calories: f64,

    /// Protein in grams.
    #[serde(default, deserialize_with = "lenient_number", alias = "たんぱく質 (g)")]
    pub protein_grams: Option<f64>,

    /// Fat in grams.
    #[serde(default, deserialize_with = "lenient_number", alias = "脂質 (g)")]
    pub fat_grams: Option<f64>,

    /// Carbohydrate in grams.
    #[serde(default, deserialize_with = "lenient_number", alias = "炭水化物 (g)")]
    pub carb_grams: Option<f64>,
}

impl MenuRow {
    /// Create a row with the given name and macronutrients.
    ///
    /// Calories default to 0 and the category to `None`; set the public
    /// fields directly to change them.
    pub fn new(
        store_name: impl Into<String>,
        item_name: impl Into<String>,
        protein_grams: f64,
        fat_grams: f64,
        carb_grams: f64,
    ) -> Self {
        Self {
            store_name: store_name.into(),
            item_name: item_name.into(),
            category: None,
            calories: 0.0,
            protein_grams: Some(protein_grams),
            fat_grams: Some(fat_grams),
            carb_grams: Some(carb_grams),
        }
    }

    /// The value of a nutrient, or `None` when it is missing or not finite.
    pub fn nutrient(&self, nutrient: Nutrient) -> Option<f64> {
        let value = match nutrient {
            Nutrient::Calories => Some(self.calories),
            Nutrient::Protein => self.protein_grams,
            Nutrient::Fat => self.fat_grams,
            Nutrient::Carbs => self.carb_grams,
        };
        value.filter(|v| v.is_finite())
    }
}

/// The read-only rows of one loaded dataset, each with a stable [`RowId`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<MenuRow>,
}

impl Dataset {
    /// Take ownership of the loaded rows, assigning ids in load order.
    pub fn new(rows: Vec<MenuRow>) -> Self {
        tracing::debug!(rows = rows.len(), "loaded menu dataset");
        Self { rows }
    }

    /// Look up a row by id.
    pub fn get(&self, id: RowId) -> Option<&MenuRow> {
        self.rows.get(id.0)
    }

    /// Iterate over every row with its id, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &MenuRow)> {
        self.rows.iter().enumerate().map(|(i, row)| (RowId(i), row))
    }

    /// Iterate over every row id.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + use<> {
        (0..self.rows.len()).map(RowId)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct non-blank store names in first-appearance order.
    pub fn store_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|row| row.store_name.as_str())
            .filter(|name| !name.trim().is_empty() && seen.insert(*name))
            .collect()
    }

    /// Build a [`NameIndex`] over [`store_names`](Self::store_names).
    pub fn name_index(&self) -> NameIndex {
        NameIndex::from_names(self.store_names())
    }
}

impl FromIterator<MenuRow> for Dataset {
    fn from_iter<I: IntoIterator<Item = MenuRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
