//! Product catalog documents (`catalog-id-{id}.xml`).
//!
//! A product catalog holds the `<product>` being configured, the
//! `<addition>` line items it offers, its `<shape>` variants and its
//! `<price_model>`. Base-like additions (holes, pots, bases, ledgers,
//! kerbsets) are described by further `<product>` nodes in the same document.

use roxmltree::Node;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::models::{
    Addition, AdditionKind, BaseRecord, PriceModelEntry, PriceTier, ProductConfig, Shape,
    ShapeFile,
};
use crate::parser::xml::{
    children, elements, first_element, number_attr, parse_document, required_attr, text_attr,
};

/// Everything read from one product catalog document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductCatalog {
    /// The selected `<product>` node
    pub product: ProductConfig,
    /// Kept additions in document order
    pub additions: Vec<Addition>,
    /// Records for base-like additions
    pub bases: Vec<BaseRecord>,
    /// Shapes the product offers
    pub shapes: Vec<Shape>,
    /// The product's own price model
    pub price_model: Vec<PriceModelEntry>,
}

/// Parses a product catalog for `product_id`.
///
/// Nodes are read in a fixed order: product, additions, shapes, price model.
///
/// # Errors
///
/// Fails on malformed XML, a missing product node, additions without `id`
/// or `type`, and numeric attributes that are not numbers.
pub fn parse_product_catalog(document: &str, text: &str, product_id: &str) -> Result<ProductCatalog> {
    let doc = parse_document(document, text)?;
    let root = doc.root_element();

    let product_node = find_product(root, product_id)
        .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()))?;
    let product = parse_product_config(product_node)?;

    let mut additions = Vec::new();
    let mut bases = Vec::new();
    for node in elements(root, "addition") {
        let Some(addition) = parse_addition(node)? else {
            continue;
        };

        if addition.kind.is_base_like() {
            let matches: Vec<Node> = elements(root, "product")
                .filter(|p| p.attribute("id") == Some(addition.id.as_str()))
                .collect();
            if matches.is_empty() {
                debug!(
                    "Dropping {} addition {}: no matching product in {}",
                    addition.kind,
                    addition.id,
                    document
                );
                continue;
            }
            for base in matches {
                bases.push(BaseRecord {
                    id: addition.id.clone(),
                    name: text_attr(base, "name"),
                    record_type: text_attr(base, "type"),
                    prices: parse_price_tiers(base)?,
                });
                additions.push(addition.clone());
            }
        } else if addition.kind == AdditionKind::Motif && addition.name != "Motif" {
            continue;
        } else {
            additions.push(addition);
        }
    }

    let shapes = elements(root, "shape")
        .map(parse_shape)
        .collect::<Result<Vec<_>>>()?;

    let price_model = elements(root, "price_model")
        .filter(|model| model.attribute("id") == Some(product_id))
        .flat_map(|model| children(model, "price"))
        .map(parse_price_model_entry)
        .collect();

    Ok(ProductCatalog {
        product,
        additions,
        bases,
        shapes,
        price_model,
    })
}

/// Last `<product>` with the given id.
fn find_product<'a, 'input: 'a>(root: Node<'a, 'input>, id: &str) -> Option<Node<'a, 'input>> {
    elements(root, "product")
        .filter(|product| product.attribute("id") == Some(id))
        .last()
}

fn parse_product_config(node: Node) -> Result<ProductConfig> {
    const EL: &str = "product";
    Ok(ProductConfig {
        id: required_attr(node, "id", EL)?.to_string(),
        code: text_attr(node, "code"),
        color: number_attr(node, "color", EL)?,
        holes: text_attr(node, "holes"),
        force: text_attr(node, "force"),
        fixed: number_attr(node, "fixed", EL)?,
        granites: text_attr(node, "granites"),
        thickness: text_attr(node, "thickness"),
        border: number_attr(node, "border", EL)?,
        background: text_attr(node, "background"),
        monument: text_attr(node, "monument"),
        laser: number_attr(node, "laser", EL)?,
        biondan: text_attr(node, "biondan"),
        price: text_attr(node, "price"),
        formula: text_attr(node, "formula"),
        formula_id: text_attr(node, "formulaID"),
        name: text_attr(node, "name"),
        translate: text_attr(node, "translate"),
        fontsize: text_attr(node, "fontsize"),
        bitmap_factor: text_attr(node, "bitmap-factor"),
        default_color: text_attr(node, "default-color"),
        material: text_attr(node, "material"),
        material_id: text_attr(node, "materialID"),
        product_type: text_attr(node, "type"),
        step: text_attr(node, "step"),
        sizes: text_attr(node, "sizes"),
        retail: text_attr(node, "retail"),
        force_retail: text_attr(node, "force_retail"),
        formula_multiplier: text_attr(node, "formula-multiplier"),
        description: text_attr(node, "description"),
        hint: text_attr(node, "hint"),
    })
}

/// Reads an `<addition>`; unknown types are skipped.
fn parse_addition(node: Node) -> Result<Option<Addition>> {
    let id = required_attr(node, "id", "addition")?;
    let kind_attr = required_attr(node, "type", "addition")?;
    let Some(kind) = AdditionKind::from_attr(kind_attr) else {
        debug!("Skipping addition {} of unknown type '{}'", id, kind_attr);
        return Ok(None);
    };

    Ok(Some(Addition {
        id: id.to_string(),
        kind,
        name: text_attr(node, "name").unwrap_or_default(),
        formula: text_attr(node, "formula"),
        note: text_attr(node, "note"),
    }))
}

/// Price tiers of the first `<price_model>` under `product`.
///
/// `quantity_type` and `currency` are copied from the price model onto
/// each tier.
pub fn parse_price_tiers(product: Node) -> Result<Vec<PriceTier>> {
    const EL: &str = "price";
    let Some(model) = first_element(product, "price_model") else {
        return Ok(Vec::new());
    };
    let quantity_type = text_attr(model, "quantity_type");
    let currency = text_attr(model, "currency");

    elements(model, "price")
        .map(|price| {
            Ok(PriceTier {
                id: text_attr(price, "id"),
                nr: text_attr(price, "nr"),
                code: text_attr(price, "code"),
                name: text_attr(price, "name"),
                model: text_attr(price, "model"),
                start_quantity: number_attr(price, "start_quantity", EL)?,
                end_quantity: number_attr(price, "end_quantity", EL)?,
                retail_multiplier: number_attr(price, "retail_multiplier", EL)?,
                note: text_attr(price, "note"),
                quantity_type: quantity_type.clone(),
                currency: currency.clone(),
            })
        })
        .collect()
}

fn parse_shape(node: Node) -> Result<Shape> {
    let mut shape = Shape {
        shape_type: text_attr(node, "type"),
        name: text_attr(node, "name"),
        double: text_attr(node, "double"),
        stand: text_attr(node, "stand"),
        code: text_attr(node, "code"),
        url: text_attr(node, "url"),
        ..Shape::default()
    };
    for file in children(node, "file") {
        let file = parse_shape_file(file)?;
        shape.files.insert(file.file_type.clone(), file);
    }
    Ok(shape)
}

fn parse_shape_file(node: Node) -> Result<ShapeFile> {
    const EL: &str = "file";
    Ok(ShapeFile {
        file_type: text_attr(node, "type").unwrap_or_default(),
        min_depth: number_attr(node, "min_depth", EL)?,
        max_depth: number_attr(node, "max_depth", EL)?,
        init_depth: number_attr(node, "init_depth", EL)?,
        min_height: number_attr(node, "min_height", EL)?,
        max_height: number_attr(node, "max_height", EL)?,
        init_height: number_attr(node, "init_height", EL)?,
        min_width: number_attr(node, "min_width", EL)?,
        max_width: number_attr(node, "max_width", EL)?,
        init_width: number_attr(node, "init_width", EL)?,
        fixed: number_attr(node, "fixed", EL)?,
        color: text_attr(node, "color"),
        color2: text_attr(node, "color2"),
        url_3d: text_attr(node, "url_3d"),
    })
}

fn parse_price_model_entry(node: Node) -> PriceModelEntry {
    PriceModelEntry {
        id: text_attr(node, "id"),
        nr: text_attr(node, "nr"),
        code: text_attr(node, "code"),
        name: text_attr(node, "name"),
        model: text_attr(node, "model"),
        start_quantity: text_attr(node, "start_quantity"),
        end_quantity: text_attr(node, "end_quantity"),
        quantity_type: text_attr(node, "quantity_type"),
        retail_multiplier: text_attr(node, "retail_multiplier"),
        note: text_attr(node, "note"),
    }
}
