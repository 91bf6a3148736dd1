//! Static product catalogs
//!
//! Each provider publishes a fixed table mapping a product type (the
//! distributing system, e.g. "GFS" or "GDAS") to the human-readable product
//! names it offers and the short code that appears in file names. The tables
//! are compiled in and never change at runtime.

use crate::errors::{ValidationError, ValidationResult};

/// Product names and codes offered under one product type
#[derive(Debug, Clone, Copy)]
pub struct ProductGroup {
    pub product_type: &'static str,
    pub products: &'static [(&'static str, &'static str)],
}

/// Read-only product catalog of one provider, in declaration order
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    groups: &'static [ProductGroup],
}

impl Catalog {
    pub const fn new(groups: &'static [ProductGroup]) -> Self {
        Self { groups }
    }

    /// Resolve a product type and name to the code used in file names
    pub fn lookup_code(
        &self,
        product_type: &str,
        product_name: &str,
    ) -> ValidationResult<&'static str> {
        let group = self
            .groups
            .iter()
            .find(|group| group.product_type == product_type)
            .ok_or_else(|| ValidationError::UnknownProductType {
                product_type: product_type.to_string(),
            })?;

        group
            .products
            .iter()
            .find(|(name, _)| *name == product_name)
            .map(|(_, code)| *code)
            .ok_or_else(|| ValidationError::UnknownProductName {
                product_type: product_type.to_string(),
                product_name: product_name.to_string(),
            })
    }

    /// Product types in catalog order
    pub fn product_types(&self) -> Vec<&'static str> {
        self.groups.iter().map(|group| group.product_type).collect()
    }

    /// Product types and product names merged into one listing
    ///
    /// Each type is followed by its product names; an entry already listed is
    /// not repeated.
    pub fn product_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for group in self.groups {
            let entries = std::iter::once(group.product_type)
                .chain(group.products.iter().map(|(name, _)| *name));
            for entry in entries {
                if !names.contains(&entry) {
                    names.push(entry);
                }
            }
        }
        names
    }

    pub fn groups(&self) -> &'static [ProductGroup] {
        self.groups
    }
}

/// Global Forecast System products
pub static GFS_CATALOG: Catalog = Catalog::new(GFS_GROUPS);

/// North American Mesoscale products
pub static NAM_CATALOG: Catalog = Catalog::new(NAM_GROUPS);

const GFS_GROUPS: &[ProductGroup] = &[
    ProductGroup {
        product_type: "GFS",
        products: &[
            ("Global longitude-latitude grid", "pgrb"),
            ("0.50 deg 'full' file description", "pgrb2full"),
            ("T1534 Semi-Lagrangian grid", "sfluxgrb"),
            ("MOS Aviation Product", "mdl_"),
            ("MDL Extratropical Storm Surge", " mdlsurge"),
            ("Smart Initialization Guam", "smartguam"),
            ("WAFS/ICAO/International Exchange/FOS Grids", "wafsgfs_"),
            ("global longitude-latitude grid (1.0 deg)", "1p0deg"),
            ("32km Lambert Conformal grid", "grd221"),
            ("World Area Forecast System", "wafs"),
            ("Sigma Atmospheric Model Data", "atm"),
            ("Surface Boundary Conditions", "sfc"),
            ("Surface Analysis", "sfcanl"),
            (
                "Binary Universal Form for the Representation of meteorological data (BUFR)",
                "bufr_d",
            ),
            ("Prepared BUFR files", "prepbufr"),
            ("BUFR Sounding Files per Station", "bufr"),
            ("Tropical Cyclone Vital Statistics", "syndata"),
        ],
    },
    ProductGroup {
        product_type: "GDAS",
        products: &[
            ("Pressure Level Data", "pgrb2"),
            ("Surface Flux", "sfluxgrb"),
            ("Prepared BUFR files", "prepbufr"),
            (
                "Binary Universal Form for the Representation of meteorological data (BUFR)",
                "bufr_d(Y)",
            ),
            ("Time Dependent Satellite Bias Correction", "abias"),
            ("Atmospheric Analysis", "atmanl"),
            ("Surface Analysis", "sfcanl"),
            ("Atmospheric Model Data", "atm"),
            ("Surface Boundary Conditions", "sfc"),
            ("Tropical Cyclone Vital Statistics", "tcvitals"),
        ],
    },
];

const NAM_GROUPS: &[ProductGroup] = &[ProductGroup {
    product_type: "NAM",
    products: &[
        ("NAM NEST over CONUS (5 km Resolution - Grid 227)", "conusnest"),
        (
            "NAM NEST - FIRE WEATHER (1.33 km CONUS / 1.5 km Alaska Resolution)",
            "firewxnest",
        ),
        ("NAM NEST over ALASKA (6 km Resolution - Grid 198)", "alaskanest"),
        ("NAM NEST over HAWAII (3 km Resolution - Grid 196)", "hawaiinest"),
        ("NAM NEST over PUERTO RICO (3 km Resolution - Grid 194)", "priconest"),
        (
            "NAM 190 Grid - CONUS (Staggered B-grid on rotated latitude/longitude grid (NAM 12km Domain))",
            "bgrdsffh",
        ),
        (
            "NAM 190 Grid - CONUS (Staggered B-grid on rotated lat/lon grid using the 60 NAM hybrid levels(NAM 12km Domain))",
            "bgrd3dfh",
        ),
        (
            "NAM 218 AWIPS Grid - CONUS (12-km Resolution; full complement of pressure level fields and some surface-based fields)",
            "awwphysfh",
        ),
        (
            "NAM 218 AWIPS Grid - CONUS (12-km Resolution; full complement of surface-based fields)",
            "awip12fh",
        ),
        (
            "NAM 181 AFWA Grid - Central America/Caribbean (12-km Resolution)",
            "afwacafh",
        ),
        ("NAM 182 AFWA Grid - North Pacific  (12-km Resolution)", "afwahifh"),
        ("NAM 215 AWIPS Grid - CONUS (20-km Resolution)", "awip32fh"),
        (
            "NAM 221 AWIPS Grid - High Resolution North American Master Grid (32-km Resolution)",
            "awwip32fh",
        ),
        (
            "NAM 212 AWIPS Grid - Regional - CONUS (Double Resolution (40-km Resolution))",
            "awip3dfh",
        ),
        ("NAM 216 AWIPS Grid - Regional - Alaska (45-km Resolution)", "awipakfh"),
        (
            "NAM 243 AWIPS Grid - Eastern North Pacific (Double Resolution (40-km Resolution))",
            "awiphifh",
        ),
        ("NAM 211 AWIPS Grid - Regional - CONUS (81-km Resolution)", "awp211fh"),
        (
            "NAM 104 AWIPS Grid (N. Hemisphere polar stereographic grid (NGM Super C grid))",
            "grbgrdfh",
        ),
        (
            "NAM 242 AWIPS Grid - Over Alaska (11.25 KM Resolution; full complement of pressure level fields and some surface-based fields)",
            "awak3dfh",
        ),
        (
            "NAM 242 AWIPS Grid - Over Alaska (11.25 KM Resolution; full complement of surface-based fields)",
            "awp242fh",
        ),
        (
            "NAM 218 AWIPS Grid - CONUS - (12-km Resolution) (GOES Simulated Brightness Temp.)",
            "goes218fh",
        ),
        (
            "NAM 221 AWIPS Grid - N. American Master (32-km Resolution) (GOES Simulated Brightness Temp.)",
            "goes221fh",
        ),
        (
            "NAM 243 AWIPS Grid - Eastern North Pacific (40-km Resolution) (GOES Simulated Brightness Temp.)",
            "goes243fh",
        ),
        (
            "NAM 198 Grid over Alaska (6-km Resolution) (NAM Smartinit for NDFD)",
            "smartak3fh",
        ),
        (
            "NAM 197 Grid - CONUS (5-km Resolution) (NAM Smartinit for NDFD)",
            "smartconusfh",
        ),
        (
            "NAM 196 Grid over Hawaii (2.5-km Resolution) (NAM Smartinit for NDFD)",
            "smarthifh",
        ),
        (
            "NAM 195 Grid over Puerto Rico (2.5-km Resolution) (NAM Smartinit for NDFD)",
            "smartprfh",
        ),
        ("NAM IMS Snow Grid (24-km Resolution)", "imssnow"),
        ("NAM MOS", "mdl_nammet"),
        (
            "NAM - Binary Universal Form for the Representation of meteorological data (BUFR)",
            "bufr_d",
        ),
    ],
}];
