//! Reference data compiled from `data/radionuclides.toml` by `build.rs`.

use crate::nuclides::{HalfValueLayers, Radionuclide};

include!(concat!(env!("OUT_DIR"), "/radionuclide_data.rs"));
