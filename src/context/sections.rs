//! Headless section controllers.
//!
//! Each designer side panel is a [`SectionController`]: it renders a
//! [`SectionView`] from the [`DesignContext`], can be shown or hidden, has
//! its title patched in place, and wires its events exactly once.

use serde::Serialize;
use tracing::debug;

use crate::context::options::fixed_options;
use crate::context::DesignContext;
use crate::models::{AdditionRecord, Section};

/// One selectable row of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    /// Catalog id or option value
    pub id: String,
    /// Display label
    pub name: String,
    /// Thumbnail path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SectionEntry {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
        }
    }

    fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// What a section shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    /// Section shown
    pub section: Section,
    /// Heading
    pub title: String,
    /// Selectable rows
    pub entries: Vec<SectionEntry>,
    /// Whether the section is open
    pub visible: bool,
}

/// Controller for one designer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionController {
    section: Section,
    title: String,
    visible: bool,
    events_attached: bool,
}

impl SectionController {
    /// A hidden controller with the section's default title.
    #[must_use]
    pub fn new(section: Section) -> Self {
        Self {
            section,
            title: section.title().to_string(),
            visible: false,
            events_attached: false,
        }
    }

    /// Section this controller drives.
    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    /// Heading shown above the entries.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the section is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Builds the section's view. Rendering twice yields the same view.
    #[must_use]
    pub fn render(&self, ctx: &DesignContext) -> SectionView {
        SectionView {
            section: self.section,
            title: self.title.clone(),
            entries: entries(self.section, ctx),
            visible: self.visible,
        }
    }

    /// Shows the section and makes it the current one.
    pub fn show(&mut self, ctx: &mut DesignContext) {
        self.visible = true;
        ctx.set_current_section(Some(self.section));
    }

    /// Hides the section; clears the current section if it was this one.
    pub fn hide(&mut self, ctx: &mut DesignContext) {
        self.visible = false;
        if ctx.current_section() == Some(self.section) {
            ctx.set_current_section(None);
        }
    }

    /// Replaces the title without re-rendering.
    pub fn update(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Marks events as wired. Returns `true` only on the first call.
    pub fn attach_events(&mut self) -> bool {
        if self.events_attached {
            return false;
        }
        self.events_attached = true;
        true
    }
}

/// Entries of `section` for the context's catalog and settings.
fn entries(section: Section, ctx: &DesignContext) -> Vec<SectionEntry> {
    if section == Section::Settings {
        return vec![
            SectionEntry::new("language", ctx.settings.language.clone()),
            SectionEntry::new("currency", ctx.settings.currency.clone()),
            SectionEntry::new("metric", ctx.settings.metric.clone()),
        ];
    }

    let options = fixed_options(section, ctx.product_type());
    if !options.is_empty() {
        return options
            .into_iter()
            .map(|option| SectionEntry::new(option.option.to_string(), option.name).with_image(option.img))
            .collect();
    }

    let Some(catalog) = ctx.catalog() else {
        return Vec::new();
    };
    let buckets = &catalog.buckets;
    match section {
        Section::Products => catalog
            .product
            .iter()
            .map(|product| SectionEntry::new(product.id.clone(), product.name.clone().unwrap_or_default()))
            .collect(),
        Section::Sizes => records(&buckets.sizes),
        Section::Shapes => catalog
            .shapes
            .iter()
            .map(|shape| {
                let entry = SectionEntry::new(
                    shape.code.clone().unwrap_or_default(),
                    shape.name.clone().unwrap_or_default(),
                );
                match &shape.url {
                    Some(url) => entry.with_image(url.clone()),
                    None => entry,
                }
            })
            .collect(),
        Section::Materials => catalog
            .materials
            .iter()
            .map(|material| {
                SectionEntry::new(material.file.clone(), material.name.clone()).with_image(material.file.clone())
            })
            .collect(),
        Section::Borders => records(&buckets.borders),
        Section::Stand => records(&buckets.stand),
        Section::Inscriptions => buckets
            .inscriptions
            .iter()
            .flat_map(|record| record.fonts.iter())
            .map(|font| {
                SectionEntry::new(
                    font.id.clone().unwrap_or_default(),
                    font.name.clone().unwrap_or_default(),
                )
            })
            .collect(),
        Section::Photos => records(&buckets.images),
        Section::Motifs => records(&buckets.motifs),
        Section::Emblems => records(&buckets.emblems),
        Section::Installations
        | Section::FixingSystem
        | Section::Corners
        | Section::Holes
        | Section::Settings => Vec::new(),
    }
}

fn records(records: &[AdditionRecord]) -> Vec<SectionEntry> {
    records
        .iter()
        .map(|record| SectionEntry::new(record.id.clone(), record.name.clone().unwrap_or_default()))
        .collect()
}

/// Controllers for the sections a product offers.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    controllers: Vec<SectionController>,
}

impl Sections {
    /// One controller per visible section of the context.
    #[must_use]
    pub fn for_context(ctx: &DesignContext) -> Self {
        Self {
            controllers: ctx
                .visible_sections()
                .into_iter()
                .map(SectionController::new)
                .collect(),
        }
    }

    /// Controller for a section.
    #[must_use]
    pub fn get(&self, section: Section) -> Option<&SectionController> {
        self.controllers.iter().find(|c| c.section() == section)
    }

    /// Mutable controller for a section.
    pub fn get_mut(&mut self, section: Section) -> Option<&mut SectionController> {
        self.controllers.iter_mut().find(|c| c.section() == section)
    }

    /// Sections with a controller, in display order.
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.controllers.iter().map(SectionController::section)
    }

    /// Opens `section`: hides every other panel, shows this one, wires its
    /// events on first open and returns its view.
    ///
    /// Returns `None` when the product does not offer the section.
    pub fn open(&mut self, section: Section, ctx: &mut DesignContext) -> Option<SectionView> {
        if self.get(section).is_none() {
            debug!("Section {} is not offered for this product", section);
            return None;
        }
        for controller in &mut self.controllers {
            if controller.section() != section && controller.is_visible() {
                controller.hide(ctx);
            }
        }
        let controller = self.get_mut(section)?;
        controller.show(ctx);
        if controller.attach_events() {
            debug!("Attached events for section {}", section);
        }
        Some(controller.render(ctx))
    }

    /// Renders every section.
    #[must_use]
    pub fn render_all(&self, ctx: &DesignContext) -> Vec<SectionView> {
        self.controllers.iter().map(|c| c.render(ctx)).collect()
    }
}
