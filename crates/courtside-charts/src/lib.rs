// Chart binding layer: turns analytics results into Plotly figure
// descriptions that the dashboard page renders as-is.

pub mod bind;
pub mod figure;
pub mod theme;

pub use bind::{
    bind, career_arc_figure, college_figure, legacy_figure, points_timeline_figure,
    position_figure, radar_figure,
};
pub use figure::{Figure, Layout, Trace};
