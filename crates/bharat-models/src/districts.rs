//! The single supported state and its districts.

/// State name accepted by the query API (compared case-insensitively).
pub const SUPPORTED_STATE: &str = "maharashtra";

/// State name as the upstream API expects it in `filters[state_name]`.
pub const UPSTREAM_STATE_NAME: &str = "MAHARASHTRA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct District {
    pub code: &'static str,
    pub name: &'static str,
}

const fn district(code: &'static str, name: &'static str) -> District {
    District { code, name }
}

/// Maharashtra districts in ascending code order; query results follow this order.
pub const MAHARASHTRA_DISTRICTS: [District; 31] = [
    district("1802", "THANE"),
    district("1803", "RAIGAD"),
    district("1804", "RATNAGIRI"),
    district("1805", "SINDHUDURG"),
    district("1806", "NASHIK"),
    district("1807", "DHULE"),
    district("1808", "JALGAON"),
    district("1809", "AHMEDNAGAR"),
    district("1810", "PUNE"),
    district("1811", "SATARA"),
    district("1812", "SANGLI"),
    district("1813", "SOLAPUR"),
    district("1814", "KOLHAPUR"),
    district("1815", "CHHATRAPATI SAMBHAJI NAGAR"),
    district("1816", "JALNA"),
    district("1818", "BEED"),
    district("1819", "NANDED"),
    district("1820", "DHARASHIV"),
    district("1821", "LATUR"),
    district("1822", "BULDHANA"),
    district("1824", "AMRAVATI"),
    district("1825", "YAVATMAL"),
    district("1826", "WARDHA"),
    district("1827", "NAGPUR"),
    district("1828", "BHANDARA"),
    district("1830", "GADCHIROLI"),
    district("1831", "NANDURBAR"),
    district("1832", "WASHIM"),
    district("1833", "GONDIA"),
    district("1834", "HINGOLI"),
    district("1835", "PALGHAR"),
];

pub fn is_supported_state(state_name: &str) -> bool {
    state_name.trim().eq_ignore_ascii_case(SUPPORTED_STATE)
}
