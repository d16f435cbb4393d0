use serde::{Deserialize, Serialize};
use std::fmt;

/// Colonnes obligatoires de la table des centres.
pub const CENTRE_COLUMNS: [&str; 4] = ["centre_code", "centre_name", "city", "device_allotted"];

/// Colonnes d'une ligne d'émargement, dans l'ordre d'export.
pub const ATTENDANCE_COLUMNS: [&str; 8] = [
    "roll_no",
    "name",
    "centre_code",
    "centre_name",
    "city",
    "device_allotted",
    "date",
    "shift",
];

/// Centre d'examen (lecture seule pour le générateur)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentreRecord {
    pub centre_code: String,
    pub centre_name: String,
    pub city: String,
    pub device_allotted: String,
}

impl CentreRecord {
    pub fn new<C, N, T, D>(centre_code: C, centre_name: N, city: T, device_allotted: D) -> Self
    where
        C: Into<String>,
        N: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            centre_code: centre_code.into(),
            centre_name: centre_name.into(),
            city: city.into(),
            device_allotted: device_allotted.into(),
        }
    }
}

/// Candidat fictif. Le jeu est figé : `Demo Name1` … `Demo Name5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DemoIdentity(u8);

impl DemoIdentity {
    pub const COUNT: usize = 5;

    /// Les 5 identités, toujours dans l'ordre 1..5.
    pub const ALL: [DemoIdentity; Self::COUNT] = [
        DemoIdentity(1),
        DemoIdentity(2),
        DemoIdentity(3),
        DemoIdentity(4),
        DemoIdentity(5),
    ];

    /// Position 1-based dans le jeu fixe.
    pub fn position(self) -> u8 {
        self.0
    }

    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DemoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Demo Name{}", self.0)
    }
}

/// Ligne d'émargement générée
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub roll_no: String,
    pub name: String,
    pub centre_code: String,
    pub centre_name: String,
    pub city: String,
    pub device_allotted: String,
    pub date: String,
    pub shift: String,
}

impl AttendanceRow {
    /// Valeurs dans l'ordre de [`ATTENDANCE_COLUMNS`].
    pub fn fields(&self) -> [&str; 8] {
        [
            self.roll_no.as_str(),
            self.name.as_str(),
            self.centre_code.as_str(),
            self.centre_name.as_str(),
            self.city.as_str(),
            self.device_allotted.as_str(),
            self.date.as_str(),
            self.shift.as_str(),
        ]
    }
}

/// Roster déjà produit lors d'un run précédent, utilisé comme préfixe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRoster {
    pub rows: Vec<AttendanceRow>,
}

impl ExistingRoster {
    pub fn new(rows: Vec<AttendanceRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
