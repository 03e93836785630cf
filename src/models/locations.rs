//! Built-in location filter options.

/// States and union territories of India, the board's default location list
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Andaman and Nicobar Islands",
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chandigarh",
    "Chhattisgarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Ladakh",
    "Lakshadweep",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Puducherry",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// Resolve the location list: configured entries win, otherwise the defaults
#[must_use]
pub fn location_options(configured: &[String]) -> Vec<String> {
    if configured.is_empty() {
        DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
    } else {
        configured.to_vec()
    }
}
