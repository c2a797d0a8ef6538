//! Shared test fixtures: a small catalog document tree on disk.
#![allow(dead_code)] // Not every test file uses every fixture

use std::fs;
use std::path::Path;

use monument_designer::config::{CatalogConfig, Config, PathConfig, ServerConfig};
use tempfile::TempDir;

pub const COUNTRIES: &str = r#"<countries>
    <country name="Australia">
        <language>en_EN</language>
        <currency>AUD</currency>
        <metric>mm</metric>
    </country>
    <country name="United States">
        <language>us_EN</language>
        <currency>USD</currency>
        <metric>inches</metric>
    </country>
</countries>"#;

pub const LANGUAGES: &str = r#"<languages>
    <language code="en_EN"><select_material>Select Material</select_material></language>
    <language code="fr_FR"><select_material>Choisir le matériau</select_material></language>
</languages>"#;

pub const US_LANGUAGES: &str = r#"<languages>
    <language code="us_EN"><select_material>Select Material</select_material></language>
</languages>"#;

pub const PROMO_CODES: &str = r#"<promo>
    <codes>
        <code id="SPRING10">10</code>
        <code id="WINTER5">5</code>
    </codes>
</promo>"#;

/// Bronze plaque (product 5) with one addition of every kind.
pub const CATALOG_5: &str = r#"<catalog>
    <product id="5" code="Plaque" name="Bronze Plaque" formula="Bronze" material="bronzes" border="1" fixed="0" color="0">
        <addition id="10" type="border" name="Border" formula="Bronze"/>
        <addition id="7" type="inscription" name="Inscription"/>
        <addition id="2300" type="image" name="Vitreous Enamel Photo"/>
        <addition id="40" type="emblem" name="Emblem"/>
        <addition id="50" type="motif" name="Motif" formula="Bronze"/>
        <addition id="51" type="motif" name="Flower" formula="Bronze"/>
        <addition id="60" type="sizes" name="Sizes"/>
        <addition id="200" type="base" name="Base"/>
        <addition id="999" type="pot" name="Flower Pot"/>
    </product>
    <product id="200" name="Granite Base" type="base">
        <price_model quantity_type="Width (mm)" currency="AUD">
            <price id="1" start_quantity="100" end_quantity="599" retail_multiplier="1.4"/>
        </price_model>
    </product>
    <shape type="plaque" name="Rectangle" code="R1" url="rectangle.svg">
        <file type="plaque" min_width="100" max_width="600" init_width="300" min_height="100" max_height="600" init_height="200" fixed="0"/>
    </shape>
    <shape type="plaque" name="Oval" code="O1" url="oval.svg">
        <file type="plaque" min_width="100" max_width="500" init_width="250" fixed="0"/>
    </shape>
    <price_model id="5" quantity_type="Width + Height (mm)">
        <price id="1" start_quantity="0" end_quantity="999" retail_multiplier="2"/>
    </price_model>
</catalog>"#;

pub const BORDERS_BRONZE: &str = r#"<products>
    <product id="10" name="Plain Border" type="border">
        <product_type><type id="1" name="Plain" min_width="5" max_width="5"/></product_type>
    </product>
</products>"#;

pub const INSCRIPTIONS: &str = r#"<products>
    <product id="7" name="Raised Lettering" type="inscription" coloursId="3" free_characters="40" min_height="5" max_height="120" init_width="200" init_height="30">
        <shapes path="fonts/">
            <font id="1" name="Garamond" url="garamond.ttf"/>
            <font id="2" name="Chopin Script" url="chopin.ttf"/>
        </shapes>
        <price_model quantity_type="Characters" currency="AUD">
            <price id="1" start_quantity="1" end_quantity="100"/>
        </price_model>
    </product>
</products>"#;

pub const IMAGES: &str = r#"<products>
    <product id="2300" name="Vitreous Enamel Photo" type="image" surface="front">
        <product_type>
            <type id="1" name="40x50" min_width="40" max_width="40" min_height="50" max_height="50" init_width="40" init_height="50"/>
            <type id="2" name="50x70" min_width="50" max_width="50" min_height="70" max_height="70" init_width="50" init_height="70"/>
        </product_type>
        <price_model quantity_type="Units" currency="AUD" fixing="screw">
            <price id="1" start_quantity="1" end_quantity="1" retail_multiplier="1.9"/>
        </price_model>
    </product>
</products>"#;

pub const EMBLEMS: &str = r#"<products>
    <product id="40" name="Cross" type="emblem">
        <product_type><type id="1" min_height="40" max_height="200" init_height="80"/></product_type>
    </product>
</products>"#;

pub const MOTIFS_BRONZE: &str = r#"<products>
    <product id="50" name="Rose" type="motif">
        <product_type><type id="1" min_height="20" max_height="300" init_height="100"/></product_type>
    </product>
</products>"#;

pub const SIZES: &str = r#"<products>
    <product id="60" name="Plaque Size" type="sizes">
        <product_type>
            <type id="1" name="300 x 200" min_width="300" max_width="300" min_height="200" max_height="200"/>
            <type id="2" name="400 x 300" min_width="400" max_width="400" min_height="300" max_height="300"/>
        </product_type>
    </product>
</products>"#;

pub const BRONZES: &str = r#"<materials path="data/jpg/bronzes/">
    <material id="1" name="Brown Patina" m2="1.2" m3=""/>
    <material id="2" name="Green Patina"/>
</materials>"#;

/// Every document of the fixture tree, by path relative to the catalog root.
pub const DOCUMENTS: &[(&str, &str)] = &[
    ("data/xml/countries24.xml", COUNTRIES),
    ("data/xml/en_EN/languages24.xml", LANGUAGES),
    ("data/xml/us_EN/languages24.xml", US_LANGUAGES),
    ("data/xml/en_EN/promo-codes.xml", PROMO_CODES),
    ("data/xml/catalog-id-5.xml", CATALOG_5),
    ("data/xml/en_EN/borders-bronze.xml", BORDERS_BRONZE),
    ("data/xml/en_EN/inscriptions.xml", INSCRIPTIONS),
    ("data/xml/en_EN/images.xml", IMAGES),
    ("data/xml/en_EN/emblems.xml", EMBLEMS),
    ("data/xml/en_EN/motifs-bronze.xml", MOTIFS_BRONZE),
    ("data/xml/en_EN/sizes.xml", SIZES),
    ("data/xml/en_EN/bronzes.xml", BRONZES),
    ("data/xml/us_EN/bronzes.xml", BRONZES),
];

/// Writes the fixture documents under `root`.
pub fn write_catalog_tree(root: &Path) {
    for (path, text) in DOCUMENTS {
        write_document(root, path, text);
    }
}

/// Writes one document under `root`, creating parent directories.
pub fn write_document(root: &Path, path: &str, text: &str) {
    let file = root.join(path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&file, text).expect("Failed to write fixture document");
}

/// Creates a temporary catalog root holding the fixture tree.
pub fn catalog_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_catalog_tree(&temp_dir.path().join("public"));
    temp_dir
}

/// Configuration pointing every path into `temp_dir`.
pub fn test_config(temp_dir: &Path) -> Config {
    Config {
        paths: PathConfig {
            xml_root: temp_dir.join("public").to_string_lossy().to_string(),
            upload_dir: temp_dir.join("uploads"),
            upload_url: "/uploads".to_string(),
            database: temp_dir.join("orders.db"),
        },
        catalog: CatalogConfig::default(),
        server: ServerConfig::default(),
    }
}
