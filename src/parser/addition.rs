//! Addition-type catalogs (`en_EN/{key}.xml`).
//!
//! One document describes every product of an addition type (all bronze
//! borders, all images, ...). Only the `<product>` matching the requested
//! addition id is extracted.

use roxmltree::Node;

use crate::error::Result;
use crate::models::{AdditionRecord, DimensionVariant, Font, InscriptionRecord};
use crate::parser::catalog::parse_price_tiers;
use crate::parser::xml::{elements, first_element, number_attr, parse_document, text_attr};

/// A record extracted from an addition-type catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAddition {
    /// An inscription record
    Inscription(InscriptionRecord),
    /// Any other addition record
    Record(AdditionRecord),
}

/// Extracts the record for addition `id`.
///
/// Returns `Ok(None)` when no product matches, or when a non-inscription
/// product has no `<product_type>` block.
///
/// # Errors
///
/// Fails on malformed XML or numeric attributes that are not numbers.
pub fn parse_addition_record(document: &str, text: &str, id: &str) -> Result<Option<ParsedAddition>> {
    let doc = parse_document(document, text)?;
    let Some(product) = elements(doc.root_element(), "product")
        .find(|product| product.attribute("id") == Some(id))
    else {
        return Ok(None);
    };

    if product.attribute("type") == Some("inscription") {
        return parse_inscription(product).map(|record| Some(ParsedAddition::Inscription(record)));
    }

    let Some(product_type) = first_element(product, "product_type") else {
        return Ok(None);
    };
    let types = elements(product_type, "type")
        .map(parse_variant)
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(ParsedAddition::Record(AdditionRecord {
        id: text_attr(product, "id").unwrap_or_default(),
        name: text_attr(product, "name"),
        surface: text_attr(product, "surface"),
        fixed: text_attr(product, "fixed"),
        record_type: text_attr(product, "type").unwrap_or_default(),
        color: text_attr(product, "color"),
        fixing: first_element(product, "price_model").and_then(|model| text_attr(model, "fixing")),
        types,
        prices: parse_price_tiers(product)?,
    })))
}

fn parse_inscription(product: Node) -> Result<InscriptionRecord> {
    const EL: &str = "product";
    let fonts = match first_element(product, "shapes") {
        Some(shapes) => {
            let path = text_attr(shapes, "path");
            elements(shapes, "font")
                .map(|font| Font {
                    id: text_attr(font, "id"),
                    nr: text_attr(font, "nr"),
                    code: text_attr(font, "code"),
                    name: text_attr(font, "name"),
                    url: text_attr(font, "url"),
                    path: path.clone(),
                })
                .collect()
        }
        None => Vec::new(),
    };

    Ok(InscriptionRecord {
        id: text_attr(product, "id").unwrap_or_default(),
        name: text_attr(product, "name"),
        surface: text_attr(product, "surface"),
        fixed: text_attr(product, "fixed"),
        record_type: text_attr(product, "type").unwrap_or_default(),
        colours_id: text_attr(product, "coloursId"),
        free_characters: text_attr(product, "free_characters"),
        min_height: number_attr(product, "min_height", EL)?,
        max_height: number_attr(product, "max_height", EL)?,
        init_width: number_attr(product, "init_width", EL)?,
        init_height: number_attr(product, "init_height", EL)?,
        url: text_attr(product, "url"),
        fonts,
        prices: parse_price_tiers(product)?,
    })
}

fn parse_variant(node: Node) -> Result<DimensionVariant> {
    const EL: &str = "type";
    Ok(DimensionVariant {
        id: text_attr(node, "id"),
        nr: text_attr(node, "nr"),
        code: text_attr(node, "code"),
        name: text_attr(node, "name"),
        min_width: number_attr(node, "min_width", EL)?,
        max_width: number_attr(node, "max_width", EL)?,
        min_height: number_attr(node, "min_height", EL)?,
        max_height: number_attr(node, "max_height", EL)?,
        min_depth: number_attr(node, "min_depth", EL)?,
        max_depth: number_attr(node, "max_depth", EL)?,
        init_width: number_attr(node, "init_width", EL)?,
        init_height: number_attr(node, "init_height", EL)?,
        init_depth: number_attr(node, "init_depth", EL)?,
        avail: text_attr(node, "avail"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGES: &str = r#"<products>
        <product id="2300" name="Vitreous Enamel Photo" type="image" surface="front" color="1">
            <product_type>
                <type id="1" name="40x50" min_width="40" max_width="40" min_height="50" max_height="50" init_width="40" init_height="50" avail="1"/>
                <type id="2" name="50x70" min_width="50" max_width="50" min_height="70" max_height="70" init_width="50" init_height="70" avail="1"/>
            </product_type>
            <price_model quantity_type="Units" currency="AUD" fixing="screw">
                <price id="1" start_quantity="1" end_quantity="1" retail_multiplier="1.9"/>
            </price_model>
        </product>
        <product id="2400" name="Ceramic Photo" type="image"/>
    </products>"#;

    const INSCRIPTIONS: &str = r#"<products>
        <product id="7" name="Inscription" type="inscription" coloursId="3" free_characters="40" min_height="5" max_height="120" init_width="200" init_height="30">
            <shapes path="fonts/">
                <font id="1" name="Garamond" url="garamond.ttf"/>
                <font id="2" name="Chopin Script" url="chopin.ttf"/>
            </shapes>
            <price_model quantity_type="Characters" currency="AUD">
                <price id="1" model="per-char" start_quantity="1" end_quantity="100"/>
            </price_model>
        </product>
    </products>"#;

    #[test]
    fn test_image_record() {
        let parsed = parse_addition_record("images.xml", IMAGES, "2300").unwrap();
        let Some(ParsedAddition::Record(record)) = parsed else {
            panic!("expected addition record");
        };
        assert_eq!(record.record_type, "image");
        assert_eq!(record.fixing.as_deref(), Some("screw"));
        assert_eq!(record.types.len(), 2);
        assert_eq!(record.types[1].max_height, Some(70.0));
        assert_eq!(record.prices[0].retail_multiplier, Some(1.9));
    }

    #[test]
    fn test_record_without_product_type_is_skipped() {
        assert_eq!(parse_addition_record("images.xml", IMAGES, "2400").unwrap(), None);
    }

    #[test]
    fn test_unknown_id_is_skipped() {
        assert_eq!(parse_addition_record("images.xml", IMAGES, "9").unwrap(), None);
    }

    #[test]
    fn test_inscription_record() {
        let parsed = parse_addition_record("inscriptions.xml", INSCRIPTIONS, "7").unwrap();
        let Some(ParsedAddition::Inscription(record)) = parsed else {
            panic!("expected inscription record");
        };
        assert_eq!(record.colours_id.as_deref(), Some("3"));
        assert_eq!(record.max_height, Some(120.0));
        assert_eq!(record.fonts.len(), 2);
        assert_eq!(record.fonts[1].name.as_deref(), Some("Chopin Script"));
        assert_eq!(record.fonts[1].path.as_deref(), Some("fonts/"));
        assert_eq!(record.prices[0].quantity_type.as_deref(), Some("Characters"));
    }
}
