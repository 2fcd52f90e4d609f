//! Cultural group catalog.
//!
//! # Responsibility
//! - Hold the fixed list of cultural groups shipped with the application.
//! - Resolve a schedule's `group_name` to display metadata.
//!
//! # Invariants
//! - `id` and `name` are each unique across a catalog.
//! - The built-in catalog is initialized once and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Color used when a group name has no catalog entry.
pub const DEFAULT_GROUP_COLOR: &str = "#059669";

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

// (id, name, short name, color)
const BUILTIN_GROUPS: &[(&str, &str, &str, &str)] = &[
    (
        "cuap",
        "COLECTIVO UNIVERSITARIO AUTOGESTIONADO DE COMUNICACIÓN POPULAR - CUAP",
        "CUAP",
        "#059669",
    ),
    (
        "coro",
        "CORO MAGNO DE LA UNIVERSIDAD DEL VALLE",
        "Coro Magno",
        "#a16207",
    ),
    (
        "estudiantina",
        "ESTUDIANTINA DE LA UNIVERSIDAD DEL VALLE",
        "Estudiantina",
        "#be123c",
    ),
    (
        "capoeira",
        "GRUPO CAPOEIRA DE LA UNIVERSIDAD DEL VALLE",
        "Capoeira",
        "#ec4899",
    ),
    (
        "arte-urbano",
        "GRUPO DE ARTE URBANO (RAP, FREESTYLE, DIBUJO, MURALISMO Y GRAFITI DE LA UNIVERSIDAD DEL VALLE)",
        "Arte Urbano",
        "#475569",
    ),
    (
        "bailes-latinos",
        "GRUPO DE BAILES LATINOS DE LA UNIVERSIDAD DEL VALLE",
        "Bailes Latinos",
        "#7c3aed",
    ),
    (
        "danza-arabe",
        "GRUPO DE DANZA ÁRABE Y TRIBAL DE LA UNIVERSIDAD DEL VALLE",
        "Danza Árabe",
        "#dc2626",
    ),
    (
        "danza-contemporanea",
        "GRUPO DE DANZA CONTEMPORÁNEA DE LA UNIVERSIDAD DEL VALLE",
        "Danza Contemporánea",
        "#ea580c",
    ),
    (
        "danza-oriental",
        "GRUPO DE DANZA ORIENTAL DE LA UNIVERSIDAD DEL VALLE",
        "Danza Oriental",
        "#0891b2",
    ),
    (
        "danza-urbana",
        "GRUPO DE DANZA URBANA Y BREACKING DE LA UNIVERSIDAD DEL VALLE",
        "Danza Urbana",
        "#16a34a",
    ),
    (
        "laboratorio-artistico",
        "GRUPO DE DANZA URBANA Y LABORATORIO ARTÍSTICO DE LA UNIVERSIDAD DEL VALLE",
        "Laboratorio Artístico",
        "#059669",
    ),
    (
        "carmen-lopez",
        "GRUPO DE MÚSICA Y DANZA CARMEN LÓPEZ DE DE LA UNIVERSIDAD DEL VALLE",
        "Carmen López",
        "#a16207",
    ),
    (
        "narracion-oral",
        "GRUPO DE NARRACIÓN ORAL Y CUENTERÍA EL PEROL DE LA UNIVERSIDAD DEL VALLE",
        "El Perol",
        "#be123c",
    ),
    (
        "poesia",
        "GRUPO DE POESÍA DE LA UNIVERSIDAD DEL VALLE",
        "Poesía",
        "#ec4899",
    ),
    (
        "teatro",
        "GRUPO DE TEATRO BIENESTAR UNIVERSITARIO DE LA UNIVERSIDAD DEL VALLE",
        "Teatro",
        "#475569",
    ),
    (
        "orquesta-salsa",
        "ORQUESTA DE SALSA Y MÚSICA LATINA DE LA UNIVERSIDAD DEL VALLE",
        "Orquesta Salsa",
        "#7c3aed",
    ),
    (
        "seleccion-salsa",
        "SELECCIÓN SALSA, BACHATA Y RITMOS LATINOS DE LA UNIVERSIDAD DEL VALLE",
        "Selección Salsa",
        "#dc2626",
    ),
    (
        "univalluno-cancion",
        "UNIVALLUNO DE CANCIÓN",
        "Univalluno de Canción",
        "#ea580c",
    ),
    (
        "voces-libres",
        "TALLER DE VOCES LIBRES, EXPRESIÓN Y COMUNICACIÓN",
        "Voces Libres",
        "#0891b2",
    ),
    (
        "baile-recreativo",
        "BAILE RECREATIVO",
        "Baile Recreativo",
        "#16a34a",
    ),
];

static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    groups: BUILTIN_GROUPS
        .iter()
        .map(|(id, name, short_name, color)| CulturalGroup {
            id: (*id).to_string(),
            name: (*name).to_string(),
            short_name: (*short_name).to_string(),
            logo: format!("/images/logos/{id}.jpg"),
            background: format!("/images/backgrounds/{id}.jpg"),
            color: (*color).to_string(),
        })
        .collect(),
});

/// One cultural group with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalGroup {
    /// Unique slug.
    pub id: String,
    /// Full canonical name; schedules reference groups by this value.
    pub name: String,
    pub short_name: String,
    pub logo: String,
    pub background: String,
    /// Hex color, `#rrggbb`.
    pub color: String,
}

/// Error raised when assembling a catalog that breaks its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(String),
    DuplicateName(String),
    EmptyField { id: String, field: &'static str },
    InvalidColor { id: String, color: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate cultural group id `{id}`"),
            Self::DuplicateName(name) => write!(f, "duplicate cultural group name `{name}`"),
            Self::EmptyField { id, field } => {
                write!(f, "cultural group `{id}` has an empty `{field}`")
            }
            Self::InvalidColor { id, color } => {
                write!(f, "cultural group `{id}` has invalid color `{color}`")
            }
        }
    }
}

impl Error for CatalogError {}

/// Read-only table of cultural groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<CulturalGroup>,
}

impl Catalog {
    /// Returns the catalog compiled into the application.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// Builds a catalog after checking identity and color invariants.
    ///
    /// # Errors
    /// - `DuplicateId` / `DuplicateName` when a key repeats.
    /// - `EmptyField` when `id`, `name` or `short_name` is blank.
    /// - `InvalidColor` when `color` is not `#rrggbb`.
    pub fn from_groups(groups: Vec<CulturalGroup>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for group in &groups {
            for (field, value) in [
                ("id", &group.id),
                ("name", &group.name),
                ("short_name", &group.short_name),
            ] {
                if value.trim().is_empty() {
                    return Err(CatalogError::EmptyField {
                        id: group.id.clone(),
                        field,
                    });
                }
            }
            if !HEX_COLOR_RE.is_match(&group.color) {
                return Err(CatalogError::InvalidColor {
                    id: group.id.clone(),
                    color: group.color.clone(),
                });
            }
            if !ids.insert(group.id.as_str()) {
                return Err(CatalogError::DuplicateId(group.id.clone()));
            }
            if !names.insert(group.name.as_str()) {
                return Err(CatalogError::DuplicateName(group.name.clone()));
            }
        }

        Ok(Self { groups })
    }

    /// Groups in catalog order.
    pub fn groups(&self) -> &[CulturalGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&CulturalGroup> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Exact, case-sensitive lookup by canonical name.
    pub fn find_by_name(&self, name: &str) -> Option<&CulturalGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Color of the group named `group_name`, or `DEFAULT_GROUP_COLOR`.
    pub fn color_for_group(&self, group_name: &str) -> &str {
        self.find_by_name(group_name)
            .map_or(DEFAULT_GROUP_COLOR, |group| group.color.as_str())
    }
}

/// Color lookup against the built-in catalog.
pub fn color_for_group(group_name: &str) -> &'static str {
    Catalog::builtin().color_for_group(group_name)
}
