pub mod schedule_grid;
pub mod template_palette;
