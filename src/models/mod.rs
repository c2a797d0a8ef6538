//! Data models for catalogs, placed items and orders.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of XML parsing, HTTP and storage.

pub mod addition;
pub mod artwork;
pub mod catalog;
pub mod item;
pub mod material;
pub mod monument;
pub mod order;
pub mod photo;
pub mod price;
pub mod section;
pub mod shape;

// Re-export all model types
pub use addition::{
    Addition, AdditionBuckets, AdditionKind, AdditionRecord, BaseRecord, Bucket, DimensionVariant,
    Font, InscriptionRecord,
};
pub use artwork::{Artwork, ArtworkSnapshot};
pub use catalog::{
    Catalog, Construction, Country, DesignMode, Language, ProductConfig, ProductType, PromoCodes,
};
pub use item::{
    Bounds, ItemError, ItemKind, ItemSize, ItemState, Orientation, Placement, SizeInput,
    SizeLimits,
};
pub use material::Material;
pub use monument::{DesignItem, ItemSnapshot, Monument};
pub use order::{Order, OrderItem, OrderWithDetails, Payment};
pub use photo::{ColorFilter, Mask, Photo, PhotoArgs, PhotoSize, PhotoSnapshot};
pub use price::{PriceModelEntry, PriceTier};
pub use section::Section;
pub use shape::{Shape, ShapeFile};
