use super::{schedule::DatedShift, RollNumberAssignment};
use crate::model::{AttendanceRow, CentreRecord, DemoIdentity};

/// Produit cartésien shift → centre → identité, dans cet ordre exact.
pub(super) fn expand(
    shifts: &[DatedShift<'_>],
    centres: &[CentreRecord],
    rolls: &RollNumberAssignment,
    out: &mut Vec<AttendanceRow>,
) {
    out.reserve(shifts.len() * centres.len() * DemoIdentity::COUNT);

    for shift in shifts {
        for centre in centres {
            for id in DemoIdentity::ALL {
                out.push(AttendanceRow {
                    roll_no: rolls.roll_no(id).to_string(),
                    name: id.name(),
                    centre_code: centre.centre_code.clone(),
                    centre_name: centre.centre_name.clone(),
                    city: centre.city.clone(),
                    device_allotted: centre.device_allotted.clone(),
                    date: shift.label.clone(),
                    shift: shift.name.to_string(),
                });
            }
        }
    }
}
