//! Charge symbols and net charge balance.

use annot_core::entities::NetCharge;
use annot_core::enums::Direction;

use crate::notation::Side;

/// Signed integer value of a charge symbol.
///
/// `+` and `-` are ±1, `<n>+` and `<n>-` are ±n. The empty symbol and the
/// unknown-charge marker `*` return `None`.
#[must_use]
pub fn charge_to_int(symbol: &str) -> Option<i32> {
    let (magnitude, sign) = if let Some(digits) = symbol.strip_suffix('+') {
        (digits, 1)
    } else if let Some(digits) = symbol.strip_suffix('-') {
        (digits, -1)
    } else {
        return None;
    };

    if magnitude.is_empty() {
        return Some(sign);
    }
    magnitude.parse::<i32>().ok().map(|n| sign * n)
}

/// Net charge moved per cycle, counted positive outward.
///
/// The first side is the inward one when it is tagged `(in)`; otherwise it
/// is the outward one and the second side moves in. The result is
/// `charge * count` outward minus `charge * count` inward, whatever the
/// second side's own tag says. Unknown unless both sides state count,
/// charge and direction.
#[must_use]
pub fn net_charge(first: &Side, second: &Side) -> NetCharge {
    let (Some(first_flux), Some(second_flux)) = (flux(first), flux(second)) else {
        return NetCharge::Unknown;
    };
    match first.direction {
        Some(Direction::In) => NetCharge::Known(second_flux - first_flux),
        _ => NetCharge::Known(first_flux - second_flux),
    }
}

fn flux(side: &Side) -> Option<i32> {
    let count = i32::try_from(side.count?).ok()?;
    side.direction?;
    Some(side.charge? * count)
}
