mod geometry_properties;
mod overlap_properties;
