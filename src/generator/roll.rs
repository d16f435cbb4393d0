use super::RosterError;
use crate::model::DemoIdentity;

/// Table identité → numéro de roll, complétée à gauche par des zéros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollNumberAssignment {
    entries: Vec<(DemoIdentity, String)>,
}

impl RollNumberAssignment {
    /// Assignation positionnelle ; ne tronque jamais.
    pub fn new(roll_length: usize) -> Result<Self, RosterError> {
        if roll_length == 0 {
            return Err(RosterError::InvalidRollLength(roll_length));
        }
        let entries = DemoIdentity::ALL
            .iter()
            .map(|&id| (id, format!("{:0>roll_length$}", id.position())))
            .collect();
        Ok(Self { entries })
    }

    pub fn roll_no(&self, id: DemoIdentity) -> &str {
        self.entries
            .iter()
            .find(|(d, _)| *d == id)
            .map(|(_, r)| r.as_str())
            .unwrap_or_default()
    }

    /// Entrées dans l'ordre 1..5.
    pub fn iter(&self) -> impl Iterator<Item = (DemoIdentity, &str)> {
        self.entries.iter().map(|(d, r)| (*d, r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_width() {
        let a = RollNumberAssignment::new(3).unwrap();
        let rolls: Vec<&str> = a.iter().map(|(_, r)| r).collect();
        assert_eq!(rolls, ["001", "002", "003", "004", "005"]);
    }

    #[test]
    fn width_one_is_bare_digit() {
        let a = RollNumberAssignment::new(1).unwrap();
        assert_eq!(a.roll_no(DemoIdentity::ALL[4]), "5");
        assert_eq!(a.len(), DemoIdentity::COUNT);
    }

    #[test]
    fn zero_width_rejected() {
        assert!(matches!(
            RollNumberAssignment::new(0),
            Err(RosterError::InvalidRollLength(0))
        ));
    }
}
