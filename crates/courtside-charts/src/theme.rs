// Dashboard colors.

pub const ACCENT: &str = "#fdb927";
pub const CARD_BG: &str = "#2d2d2d";
pub const TEXT: &str = "#ffffff";
pub const GRID: &str = "#3d3d3d";

/// Light grid used on the white-background bar and box charts.
pub const LIGHT_GRID: &str = "rgba(0,0,0,0.1)";

/// Qualitative palette for per-series colors.
pub const SET3: [&str; 12] = [
    "rgb(141,211,199)",
    "rgb(255,255,179)",
    "rgb(190,186,218)",
    "rgb(251,128,114)",
    "rgb(128,177,211)",
    "rgb(253,180,98)",
    "rgb(179,222,105)",
    "rgb(252,205,229)",
    "rgb(217,217,217)",
    "rgb(188,128,189)",
    "rgb(204,235,197)",
    "rgb(255,237,111)",
];

/// Palette color for the `index`-th series, wrapping around.
pub fn series_color(index: usize) -> &'static str {
    SET3[index % SET3.len()]
}
