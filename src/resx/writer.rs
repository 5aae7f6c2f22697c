//! Streaming writer for resx documents.

use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use quick_xml::{
    events::{attributes::Attribute, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    name::QName,
    Writer,
};

use crate::{
    metadata::{
        resources::ResourceEntry,
        typesystem::{HostEnvironment, HostTypes, ModuleContext},
    },
    resx::{
        escape::{escape_attribute, escape_text},
        format_payload,
        schema::{schema_lines, SCHEMA_COMMENT},
        ResourceInfo, ResxWriterConfig, TypeNameResolver, RES_MIME_TYPE, VERSION,
    },
    Error, Result,
};

/// The UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the resources of one module as a resx document.
///
/// The document skeleton (prolog, root element, schema and the four `resheader` elements)
/// is written on construction. Each [`ResxWriter::add_resource`] call then appends one
/// `data` element, and finalization writes the closing root element.
///
/// # Lifecycle
///
/// - [`ResxWriter::generate`] finalizes the document; a second call fails with
///   [`Error::AlreadyFinalized`]
/// - [`ResxWriter::close`] finalizes if that has not happened yet and hands back the output
/// - Dropping an unfinished writer finalizes it on a best-effort basis; failures are logged
///
/// # Examples
///
/// ```rust
/// use dotresx::{
///     metadata::{
///         resources::{ResourceEntry, ResourceType},
///         typesystem::{HostEnvironment, ModuleInfo},
///     },
///     resx::{ResxWriter, ResxWriterConfig},
/// };
///
/// let module = ModuleInfo::net_framework("MyApp");
/// let mut writer = ResxWriter::with_config(
///     Vec::new(),
///     &module,
///     HostEnvironment::net_framework(),
///     ResxWriterConfig::without_bom(),
/// )?;
/// writer.add_resource(&ResourceEntry::built_in(
///     "Greeting",
///     ResourceType::String("hello".into()),
/// ))?;
///
/// let document = String::from_utf8(writer.close()?).unwrap();
/// assert!(document.contains(r#"<data name="Greeting" xml:space="preserve">"#));
/// assert!(document.ends_with("</root>"));
/// # Ok::<(), dotresx::Error>(())
/// ```
pub struct ResxWriter<'a, W: Write> {
    xml: Option<Writer<W>>,
    names: TypeNameResolver<'a>,
    config: ResxWriterConfig,
    written: bool,
    entries: usize,
}

impl<'a> ResxWriter<'a, BufWriter<File>> {
    /// Create the file at `path` and start a document for `module` in it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileError`] if the file cannot be created or written.
    pub fn create(path: impl AsRef<Path>, module: &'a dyn ModuleContext) -> Result<Self> {
        Self::create_with_config(
            path,
            module,
            HostEnvironment::default(),
            ResxWriterConfig::default(),
        )
    }

    /// Create the file at `path` and start a document with an explicit host and layout.
    ///
    /// # Errors
    ///
    /// - [`Error::FileError`] if the file cannot be created or written
    /// - [`Error::TypeResolutionFailure`] if the host lacks the resx reader or writer type
    pub fn create_with_config(
        path: impl AsRef<Path>,
        module: &'a dyn ModuleContext,
        host: impl HostTypes + 'a,
        config: ResxWriterConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Creating resx file {:?}", path);

        let file = File::create(path)?;
        Self::with_config(BufWriter::new(file), module, host, config)
    }
}

impl<'a, W: Write> ResxWriter<'a, W> {
    /// Start a document for `module` in `output`, as written by a .NET Framework host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileError`] if writing the document skeleton fails.
    pub fn new(output: W, module: &'a dyn ModuleContext) -> Result<Self> {
        Self::with_config(
            output,
            module,
            HostEnvironment::default(),
            ResxWriterConfig::default(),
        )
    }

    /// Start a document for `module` in `output`.
    ///
    /// `host` supplies the resx reader and writer types named in the headers, and the null
    /// marker type for modules without a Windows Forms reference.
    ///
    /// # Errors
    ///
    /// - [`Error::FileError`] if writing the document skeleton fails
    /// - [`Error::TypeResolutionFailure`] if the host lacks the resx reader or writer type
    pub fn with_config(
        mut output: W,
        module: &'a dyn ModuleContext,
        host: impl HostTypes + 'a,
        config: ResxWriterConfig,
    ) -> Result<Self> {
        let names = TypeNameResolver::new(module, host);
        let reader_type = names.reader_type_name()?;
        let writer_type = names.writer_type_name()?;

        if config.emit_bom {
            output.write_all(UTF8_BOM)?;
        }

        let mut writer = ResxWriter {
            xml: Some(Writer::new(output)),
            names,
            config,
            written: false,
            entries: 0,
        };
        writer.write_prolog()?;
        for (name, value) in [
            ("resmimetype", RES_MIME_TYPE),
            ("version", VERSION),
            ("reader", reader_type.as_str()),
            ("writer", writer_type.as_str()),
        ] {
            writer.write_header(name, value)?;
        }

        tracing::debug!("Started resx document, reader type {}", reader_type);
        Ok(writer)
    }

    /// Append the `data` element for `entry`.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyFinalized`] if the document was already finalized
    /// - [`Error::UnsupportedPayload`] if the value has no resx representation
    /// - [`Error::TypeResolutionFailure`] if the value's type name cannot be resolved
    /// - [`Error::FileError`] if writing fails
    pub fn add_resource(&mut self, entry: &ResourceEntry) -> Result<()> {
        if self.written {
            return Err(Error::AlreadyFinalized);
        }

        let info = format_payload(&entry.payload, &self.names)?;
        tracing::debug!(
            "Adding resource {:?} (type: {:?}, mimetype: {:?})",
            entry.name,
            info.type_name,
            info.mime_type
        );

        self.write_data(&entry.name, &info)?;
        self.entries += 1;
        Ok(())
    }

    /// Write the closing root element and flush the output.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyFinalized`] if the document was already finalized
    /// - [`Error::FileError`] if writing or flushing fails
    pub fn generate(&mut self) -> Result<()> {
        if self.written {
            return Err(Error::AlreadyFinalized);
        }
        self.written = true;

        self.break_line(0)?;
        let xml = self.xml()?;
        xml.write_event(Event::End(BytesEnd::new("root")))?;
        xml.get_mut().flush()?;

        tracing::info!("Finished resx document with {} resources", self.entries);
        Ok(())
    }

    /// Finalize the document unless that already happened, and release the output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileError`] if finalizing fails.
    pub fn close(mut self) -> Result<W> {
        if !self.written {
            self.generate()?;
        }

        match self.xml.take() {
            Some(xml) => Ok(xml.into_inner()),
            None => Err(Error::AlreadyFinalized),
        }
    }

    /// Returns `true` once the closing root element was written.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.written
    }

    /// Number of resources written so far.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// The resolver used for the type names of this document.
    #[must_use]
    pub fn type_names(&self) -> &TypeNameResolver<'a> {
        &self.names
    }

    fn xml(&mut self) -> Result<&mut Writer<W>> {
        self.xml.as_mut().ok_or(Error::AlreadyFinalized)
    }

    /// Start a new line indented to `depth`; nothing in compact layout.
    fn break_line(&mut self, depth: usize) -> Result<()> {
        let ResxWriterConfig {
            indent_width,
            line_ending,
            ..
        } = self.config;
        if indent_width == 0 {
            return Ok(());
        }

        let output = self.xml()?.get_mut();
        output.write_all(line_ending.as_bytes())?;
        output.write_all(" ".repeat(indent_width * depth).as_bytes())?;
        Ok(())
    }

    fn write_prolog(&mut self) -> Result<()> {
        self.xml()?
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.break_line(0)?;
        self.xml()?.write_event(Event::Start(BytesStart::new("root")))?;

        // The schema is static markup; it goes out verbatim at the root's child level
        self.break_line(1)?;
        let comment = SCHEMA_COMMENT.replace('\n', self.config.line_ending);
        self.xml()?.get_mut().write_all(comment.as_bytes())?;
        for (depth, markup) in schema_lines() {
            self.break_line(depth + 1)?;
            self.xml()?.get_mut().write_all(markup.as_bytes())?;
        }

        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<()> {
        let mut header = BytesStart::new("resheader");
        push_attribute(&mut header, "name", name);

        self.write_element(header, value)
    }

    fn write_data(&mut self, name: &str, info: &ResourceInfo) -> Result<()> {
        let mut data = BytesStart::new("data");
        push_attribute(&mut data, "name", name);
        if let Some(type_name) = &info.type_name {
            push_attribute(&mut data, "type", type_name);
        }
        if let Some(mime_type) = info.mime_type {
            push_attribute(&mut data, "mimetype", mime_type);
        }
        if info.preserves_space() {
            push_attribute(&mut data, "xml:space", "preserve");
        }

        self.write_element(data, &info.value)
    }

    /// Write a child of the root holding a single `value` element.
    fn write_element(&mut self, start: BytesStart<'_>, value: &str) -> Result<()> {
        let end = start.to_end().into_owned();

        self.break_line(1)?;
        self.xml()?.write_event(Event::Start(start))?;
        self.break_line(2)?;
        write_value(self.xml()?, value)?;
        self.break_line(1)?;
        self.xml()?.write_event(Event::End(end))?;
        Ok(())
    }
}

impl<W: Write> Drop for ResxWriter<'_, W> {
    fn drop(&mut self) {
        if self.written || self.xml.is_none() {
            return;
        }

        if let Err(error) = self.generate() {
            tracing::warn!("Failed to finalize resx document on drop: {}", error);
        }
    }
}

/// Add an attribute, escaped the way the .NET text writer escapes it.
fn push_attribute(element: &mut BytesStart<'_>, key: &str, value: &str) {
    let value = escape_attribute(value).into_owned().into_bytes();
    element.push_attribute(Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(value),
    });
}

/// Write a `value` element; an empty value is written as `<value />`.
fn write_value<W: Write>(xml: &mut Writer<W>, text: &str) -> Result<()> {
    if text.is_empty() {
        xml.write_event(Event::Empty(BytesStart::from_content("value ", 5)))?;
        return Ok(());
    }

    xml.write_event(Event::Start(BytesStart::new("value")))?;
    xml.write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
    xml.write_event(Event::End(BytesEnd::new("value")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        metadata::{
            resources::{ResourceType, SerializationFormat},
            typesystem::ModuleInfo,
        },
        resx::LF,
    };

    fn render(entries: &[ResourceEntry]) -> String {
        let module = ModuleInfo::net_framework("App");
        let mut writer = ResxWriter::with_config(
            Vec::new(),
            &module,
            HostEnvironment::net_framework(),
            ResxWriterConfig::without_bom(),
        )
        .unwrap();
        for entry in entries {
            writer.add_resource(entry).unwrap();
        }
        String::from_utf8(writer.close().unwrap()).unwrap()
    }

    /// Everything between the last `resheader` and the closing root element.
    fn body(document: &str) -> &str {
        let start = document.rfind("</resheader>").unwrap() + "</resheader>".len();
        let end = document.rfind("\r\n</root>").unwrap();
        &document[start..end]
    }

    #[test]
    fn test_string_entry() {
        let document = render(&[ResourceEntry::built_in(
            "Greeting",
            ResourceType::String("hello".into()),
        )]);

        assert_eq!(
            body(&document),
            "\r\n  <data name=\"Greeting\" xml:space=\"preserve\">\r\n    <value>hello</value>\r\n  </data>"
        );
    }

    #[test]
    fn test_empty_value_is_self_closing() {
        let document = render(&[ResourceEntry::built_in("Empty", ResourceType::String(String::new()))]);

        assert_eq!(
            body(&document),
            "\r\n  <data name=\"Empty\" xml:space=\"preserve\">\r\n    <value />\r\n  </data>"
        );
    }

    #[test]
    fn test_escaping() {
        let document = render(&[ResourceEntry::built_in(
            "a\"b<c>",
            ResourceType::String("x & y < z".into()),
        )]);

        assert!(document.contains("<data name=\"a&quot;b&lt;c&gt;\" xml:space=\"preserve\">"));
        assert!(document.contains("<value>x &amp; y &lt; z</value>"));
    }

    #[test]
    fn test_attribute_order() {
        let document = render(&[ResourceEntry::binary(
            "Icon",
            SerializationFormat::TypeConverterByteArray,
            "System.Drawing.Icon, System.Drawing",
            vec![1, 2, 3],
        )]);

        assert!(document.contains(
            "<data name=\"Icon\" type=\"System.Drawing.Icon, System.Drawing\" mimetype=\"application/x-microsoft.net.object.bytearray.base64\">"
        ));
    }

    #[test]
    fn test_generate_twice() {
        let module = ModuleInfo::net_framework("App");
        let mut writer = ResxWriter::new(Vec::new(), &module).unwrap();

        writer.generate().unwrap();
        assert!(writer.is_finalized());
        assert!(matches!(writer.generate(), Err(Error::AlreadyFinalized)));
        assert!(matches!(
            writer.add_resource(&ResourceEntry::built_in("Late", ResourceType::Int32(1))),
            Err(Error::AlreadyFinalized)
        ));

        let document = writer.close().unwrap();
        assert!(document.starts_with(UTF8_BOM));
        assert_eq!(String::from_utf8_lossy(&document).matches("</root>").count(), 1);
    }

    #[test]
    fn test_failed_entry_leaves_writer_usable() {
        let module = ModuleInfo::net_framework("App");
        let mut writer = ResxWriter::new(Vec::new(), &module).unwrap();

        assert!(matches!(
            writer.add_resource(&ResourceEntry::built_in("Marker", ResourceType::StartOfUserTypes)),
            Err(Error::UnsupportedPayload(_))
        ));
        assert_eq!(writer.entry_count(), 0);
        writer
            .add_resource(&ResourceEntry::built_in("Ok", ResourceType::Boolean(true)))
            .unwrap();
        assert_eq!(writer.entry_count(), 1);
    }

    #[test]
    fn test_compact_layout() {
        let module = ModuleInfo::net_framework("App");
        let mut writer = ResxWriter::with_config(
            Vec::new(),
            &module,
            HostEnvironment::net_framework(),
            ResxWriterConfig::compact(),
        )
        .unwrap();
        writer
            .add_resource(&ResourceEntry::built_in("Count", ResourceType::Int32(3)))
            .unwrap();
        let document = String::from_utf8(writer.close().unwrap()).unwrap();

        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?><root><!-- "));
        assert!(document.contains("</xsd:schema><resheader name=\"resmimetype\"><value>text/microsoft-resx</value></resheader>"));
        assert!(document.ends_with("<value>3</value></data></root>"));
    }

    #[test]
    fn test_default_layout_uses_crlf() {
        let module = ModuleInfo::net_framework("App");
        let mut writer = ResxWriter::new(Vec::new(), &module).unwrap();
        writer
            .add_resource(&ResourceEntry::built_in("Greeting", ResourceType::String("hi".into())))
            .unwrap();
        let document = writer.close().unwrap();
        let document = std::str::from_utf8(&document[UTF8_BOM.len()..]).unwrap();

        assert!(document.starts_with(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<root>\r\n  <!-- \r\n    Microsoft ResX Schema \r\n"
        ));
        assert!(document.contains("    -->\r\n  <xsd:schema id=\"root\""));
        assert!(document.ends_with("</data>\r\n</root>"));
        assert_eq!(document.matches('\n').count(), document.matches("\r\n").count());
    }

    #[test]
    fn test_lf_layout() {
        let module = ModuleInfo::net_framework("App");
        let mut writer = ResxWriter::with_config(
            Vec::new(),
            &module,
            HostEnvironment::net_framework(),
            ResxWriterConfig::without_bom().with_line_ending(LF),
        )
        .unwrap();
        writer
            .add_resource(&ResourceEntry::built_in("Count", ResourceType::Int32(3)))
            .unwrap();
        let document = String::from_utf8(writer.close().unwrap()).unwrap();

        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root>\n  <!-- \n"));
        assert!(!document.contains('\r'));
        assert!(document.ends_with("    <value>3</value>\n  </data>\n</root>"));
    }

    #[test]
    fn test_headers_use_resolved_type_names() {
        let module = ModuleInfo::net("App", 8);
        let writer = ResxWriter::with_config(
            Vec::new(),
            &module,
            HostEnvironment::net(8),
            ResxWriterConfig::without_bom(),
        )
        .unwrap();
        let reader_type = writer.type_names().reader_type_name().unwrap();
        let writer_type = writer.type_names().writer_type_name().unwrap();
        let document = String::from_utf8(writer.close().unwrap()).unwrap();

        assert!(reader_type.ends_with("System.Windows.Forms, Version=8.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"));
        assert!(document.contains(&format!(
            "<resheader name=\"reader\">\r\n    <value>{reader_type}</value>\r\n  </resheader>"
        )));
        assert!(document.contains(&format!(
            "<resheader name=\"writer\">\r\n    <value>{writer_type}</value>\r\n  </resheader>"
        )));
    }
}
