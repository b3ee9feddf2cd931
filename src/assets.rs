pub(crate) mod processor;
pub(crate) mod recolor;
pub(crate) mod svg_doc;
pub(crate) mod svg_raster;
