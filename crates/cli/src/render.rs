//! Catalog table output.

use std::io;

use catalog_app::CatalogEntry;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

const HEADER: [&str; 6] = ["ID", "Title", "Description", "Price", "Photo", "Image"];

/// Write `entries` as a table. With `embed`, the image column holds the full `data:` URL.
pub(crate) fn write_catalog(
    out: &mut impl io::Write,
    entries: &[CatalogEntry],
    embed: bool,
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "no products");
    }

    let mut builder = Builder::default();
    builder.push_record(HEADER);

    for entry in entries {
        let product = &entry.product;

        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.description.clone(),
            product.price.to_string(),
            product.photo.clone(),
            image_cell(&entry.photo_data_url, embed),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")
}

fn image_cell(data_url: &str, embed: bool) -> String {
    if data_url.is_empty() {
        "missing".to_string()
    } else if embed {
        data_url.to_string()
    } else {
        format!("{} bytes", data_url.len())
    }
}
