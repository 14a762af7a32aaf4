//! Listing column names and raw field parsing.

use alloc::string::String;

pub const NAME: &str = "name";
pub const PRICE: &str = "price";
pub const BEDS: &str = "beds";
pub const ACCOMMODATES: &str = "accommodates";
pub const PROPERTY_TYPE: &str = "property_type";
pub const ROOM_TYPE: &str = "room_type";
pub const NEIGHBOURHOOD: &str = "neighbourhood";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const HOST_NAME: &str = "host_name";
pub const LISTING_URL: &str = "listing_url";

/// Derived: `price / beds`, rounded to cents.
pub const PRICE_PER_BED: &str = "price_per_bed";
/// Derived: `price / accommodates`, rounded to cents.
pub const PRICE_PER_PERSON: &str = "price_per_person";

/// Columns a listings table must carry.
pub const REQUIRED: [&str; 8] = [
    PRICE,
    BEDS,
    ACCOMMODATES,
    PROPERTY_TYPE,
    ROOM_TYPE,
    NEIGHBOURHOOD,
    LATITUDE,
    LONGITUDE,
];

/// Columns shown in the listings data table, when present.
pub const DISPLAY: [&str; 8] = [
    NAME,
    PRICE,
    NEIGHBOURHOOD,
    PROPERTY_TYPE,
    ROOM_TYPE,
    BEDS,
    HOST_NAME,
    LISTING_URL,
];

/// Parses a scraped price such as `"$1,250.00"`.
///
/// Dollar signs and thousands separators are ignored. Returns `None` for
/// anything that is not a number once they are removed.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.parse().ok()
}
