//! Minimal Office Open XML workbook writer.
//!
//! One worksheet named `Attendance`, every cell an inline string, every
//! column 15 characters wide. The static package parts are constants; the
//! worksheet is generated with `quick-xml`.

use std::io::{Cursor, Write};

use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::{
  error::{Error, Result},
  table::Sheet,
};

pub const SHEET_NAME: &str = "Attendance";
const COLUMN_WIDTH: &str = "15";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn workbook_xml() -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{NS_MAIN}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{SHEET_NAME}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
  )
}

// ─── Cell references ──────────────────────────────────────────────────────────

/// Zero-based column index → `A`, `B`, ..., `Z`, `AA`, ...
fn column_letters(mut index: usize) -> String {
  let mut letters = Vec::new();
  loop {
    letters.push(b'A' + (index % 26) as u8);
    if index < 26 {
      break;
    }
    index = index / 26 - 1;
  }
  letters.reverse();
  String::from_utf8(letters).unwrap_or_default()
}

// ─── Worksheet ────────────────────────────────────────────────────────────────

fn xml_err(e: impl std::fmt::Display) -> Error { Error::Xml(e.to_string()) }

fn worksheet_xml(sheet: &Sheet) -> Result<Vec<u8>> {
  let mut w = Writer::new(Cursor::new(Vec::new()));
  w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
    .map_err(xml_err)?;

  let mut root = BytesStart::new("worksheet");
  root.push_attribute(("xmlns", NS_MAIN));
  w.write_event(Event::Start(root)).map_err(xml_err)?;

  let width = sheet.width().max(1);
  w.write_event(Event::Start(BytesStart::new("cols"))).map_err(xml_err)?;
  let mut col = BytesStart::new("col");
  col.push_attribute(("min", "1"));
  col.push_attribute(("max", width.to_string().as_str()));
  col.push_attribute(("width", COLUMN_WIDTH));
  col.push_attribute(("customWidth", "1"));
  w.write_event(Event::Empty(col)).map_err(xml_err)?;
  w.write_event(Event::End(BytesEnd::new("cols"))).map_err(xml_err)?;

  w.write_event(Event::Start(BytesStart::new("sheetData"))).map_err(xml_err)?;
  for (r, row) in sheet.rows.iter().enumerate() {
    let row_ref = (r + 1).to_string();
    let mut row_el = BytesStart::new("row");
    row_el.push_attribute(("r", row_ref.as_str()));
    w.write_event(Event::Start(row_el)).map_err(xml_err)?;

    for (c, value) in row.iter().enumerate().filter(|(_, v)| !v.is_empty()) {
      let cell_ref = format!("{}{}", column_letters(c), row_ref);
      let mut cell = BytesStart::new("c");
      cell.push_attribute(("r", cell_ref.as_str()));
      cell.push_attribute(("t", "inlineStr"));
      w.write_event(Event::Start(cell)).map_err(xml_err)?;
      w.write_event(Event::Start(BytesStart::new("is"))).map_err(xml_err)?;
      let mut t = BytesStart::new("t");
      if value.trim() != value.as_str() {
        t.push_attribute(("xml:space", "preserve"));
      }
      w.write_event(Event::Start(t)).map_err(xml_err)?;
      w.write_event(Event::Text(BytesText::new(value))).map_err(xml_err)?;
      w.write_event(Event::End(BytesEnd::new("t"))).map_err(xml_err)?;
      w.write_event(Event::End(BytesEnd::new("is"))).map_err(xml_err)?;
      w.write_event(Event::End(BytesEnd::new("c"))).map_err(xml_err)?;
    }

    w.write_event(Event::End(BytesEnd::new("row"))).map_err(xml_err)?;
  }
  w.write_event(Event::End(BytesEnd::new("sheetData"))).map_err(xml_err)?;
  w.write_event(Event::End(BytesEnd::new("worksheet"))).map_err(xml_err)?;

  Ok(w.into_inner().into_inner())
}

// ─── Package ──────────────────────────────────────────────────────────────────

/// Serialize `sheet` as an `.xlsx` workbook.
pub fn to_xlsx(sheet: &Sheet) -> Result<Vec<u8>> {
  let sheet_xml = worksheet_xml(sheet)?;
  let workbook = workbook_xml();

  let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
  let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

  let parts: [(&str, &[u8]); 5] = [
    ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
    ("_rels/.rels", ROOT_RELS.as_bytes()),
    ("xl/workbook.xml", workbook.as_bytes()),
    ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
    ("xl/worksheets/sheet1.xml", &sheet_xml),
  ];
  for (name, body) in parts {
    zip.start_file(name, opts)?;
    zip.write_all(body)?;
  }

  Ok(zip.finish()?.into_inner())
}
