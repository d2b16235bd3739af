//! Fixed vocabularies and thresholds.
//!
//! All taxonomy data lives here as immutable constants loaded with the
//! binary: the category-D part vocabulary, the simulator part-name
//! dictionary, and the effect-size magnitude thresholds. Nothing in this
//! module is mutated at runtime.

/// Category-D vocabulary: side-qualified vehicle regions.
///
/// Two-character codes combine a component (F = front, M = middle, B = back)
/// with a side (L / R). Every score is awarded against exactly this set, so
/// `max_points` for one vehicle report equals its length.
pub const CAT_D_PARTS: [&str; 6] = ["FL", "FR", "ML", "MR", "BL", "BR"];

/// Bare side letters a report or simulator may use instead of a full code.
pub const CAT_D_SIDES: [char; 2] = ['L', 'R'];

/// Bare component letters (front / middle / back) without side information.
pub const CAT_D_COMPONENTS: [char; 3] = ['F', 'M', 'B'];

/// Effect-size magnitude boundaries for |2·(A − 0.5)|
/// (Hess and Kromrey, 2004). Index = number of thresholds strictly below the
/// scaled estimate: negligible, small, medium, large.
pub const MAGNITUDE_THRESHOLDS: [f64; 3] = [0.147, 0.33, 0.474];

/// Fixed significance level for the two-sample mean comparison.
pub const SIGNIFICANCE_ALPHA: f64 = 0.05;

/// Simulator part names mapped to category-D codes.
///
/// The damage model reports named components ("Front Bumper", "Left
/// Headlight", ...) while police reports speak in region codes; this table is
/// the bridge. Entries without a clear side map to a bare component letter
/// and are resolved by the two-sided decode in [`crate::report`].
pub const VEHICLE_PART_CODES: [(&str, &str); 37] = [
    ("Tailgate", "B"),
    ("Wagon Unibody", "M"),
    ("Rear Bumper", "B"),
    ("Front Bumper Support", "F"),
    ("Front Bumper", "F"),
    ("Hood", "F"),
    ("Right Headlight", "FR"),
    ("Left Headlight", "FL"),
    ("Front Right Fender", "FR"),
    ("Front Left Fender", "FL"),
    ("Single Exhaust", "B"),
    ("Front Right Door", "MR"),
    ("Front Left Door", "ML"),
    ("Rear Right Door", "MR"),
    ("Rear Left Door", "ML"),
    ("Wagon Right Taillight", "MR"),
    ("Right Mirror", "FR"),
    ("Left Mirror", "FL"),
    ("Dual Outlet Exhaust", "B"),
    ("Wagon Left Taillight", "ML"),
    ("Radiator", "F"),
    ("Independent Front Suspension", "F"),
    ("Independent Rear Suspension", "B"),
    ("Steering", "FL"),
    ("Tailgate Glass", "B"),
    ("Front Strut Brace", "F"),
    ("Front Left Door Glass", "FL"),
    ("Front Right Door Glass", "FR"),
    ("Passenger Seat", "FR"),
    ("Driver Seat", "FL"),
    ("Front Spindles", "F"),
    ("Rear Spindles", "B"),
    ("Rear Right Door Glass", "BR"),
    ("Rear Left Door Glass", "BL"),
    ("Rear Seats", "R"),
    ("Front Sway Bar", "F"),
    ("Stock Intake", "F"),
];

/// Look up the category-D code for a simulator part name.
pub fn part_code(name: &str) -> Option<&'static str> {
    VEHICLE_PART_CODES
        .iter()
        .find(|(part, _)| *part == name)
        .map(|(_, code)| *code)
}
