use crate::shared::Result;
use crate::trimming::domain::SpecializedDependency;
use anyhow::Context;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const DEPENDENCY_ELEMENT: &[u8] = b"dependency";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    GroupId,
    ArtifactId,
    Version,
}

impl FieldKind {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"groupId" => Some(FieldKind::GroupId),
            b"artifactId" => Some(FieldKind::ArtifactId),
            b"version" => Some(FieldKind::Version),
            _ => None,
        }
    }
}

/// Coordinate element (`groupId`, `artifactId`, `version`) directly under a `<dependency>`
#[derive(Debug, Clone)]
struct Field {
    start: BytesStart<'static>,
    content: Vec<Event<'static>>,
    end: Option<BytesEnd<'static>>,
    /// Value as parsed; members are matched against this, never the rewritten value
    original: String,
    value: String,
    modified: bool,
}

impl Field {
    fn parsed(
        start: BytesStart<'static>,
        content: Vec<Event<'static>>,
        end: Option<BytesEnd<'static>>,
        value: String,
    ) -> Self {
        Self {
            start,
            content,
            end,
            original: value.clone(),
            value,
            modified: false,
        }
    }

    fn set(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.modified = true;
        }
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        if !self.modified {
            match &self.end {
                Some(end) => {
                    writer.write_event(Event::Start(self.start.borrow()))?;
                    for event in &self.content {
                        writer.write_event(event.borrow())?;
                    }
                    writer.write_event(Event::End(end.borrow()))?;
                }
                None => writer.write_event(Event::Empty(self.start.borrow()))?,
            }
            return Ok(());
        }

        if self.value.is_empty() {
            writer.write_event(Event::Empty(self.start.borrow()))?;
        } else {
            writer.write_event(Event::Start(self.start.borrow()))?;
            writer.write_event(Event::Text(BytesText::new(&self.value)))?;
            writer.write_event(Event::End(self.start.to_end()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Node {
    Event(Event<'static>),
    Field(Field),
}

/// Indices (into the node list) of the first coordinate fields of one declaration
#[derive(Debug, Clone, Copy, Default)]
struct Declaration {
    group_id: Option<usize>,
    artifact_id: Option<usize>,
    version: Option<usize>,
}

impl Declaration {
    fn record(&mut self, kind: FieldKind, index: usize) {
        let slot = match kind {
            FieldKind::GroupId => &mut self.group_id,
            FieldKind::ArtifactId => &mut self.artifact_id,
            FieldKind::Version => &mut self.version,
        };
        if slot.is_none() {
            *slot = Some(index);
        }
    }
}

/// Coordinates of one `<dependency>` declaration as currently held by a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

/// DescriptorDocument - a parsed build descriptor
///
/// Keeps every XML event of the source so that writing an unmodified document
/// reproduces its content. Only the `groupId`, `artifactId` and `version`
/// children of `<dependency>` elements are editable.
#[derive(Debug, Clone)]
pub struct DescriptorDocument {
    nodes: Vec<Node>,
    declarations: Vec<(usize, usize, Option<usize>)>,
}

impl DescriptorDocument {
    /// Parses a descriptor.
    ///
    /// # Errors
    /// Returns an error if the XML is malformed, has no root element, or ends
    /// with unclosed elements.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut nodes = Vec::new();
        let mut declarations = Vec::new();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut open_dependencies: Vec<(usize, Declaration)> = Vec::new();
        let mut has_root = false;

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .with_context(|| format!("Malformed XML near byte {}", position))?;

            match event {
                Event::Start(start) => {
                    if stack.is_empty() {
                        has_root = true;
                    }
                    let local_name = start.local_name().as_ref().to_vec();
                    let field = Self::field_kind(&local_name, stack.len(), &open_dependencies);

                    if let Some(kind) = field {
                        let (content, end, value) = Self::read_field(&mut reader, &local_name)?;
                        nodes.push(Node::Field(Field::parsed(
                            start.into_owned(),
                            content,
                            Some(end),
                            value,
                        )));
                        if let Some((_, declaration)) = open_dependencies.last_mut() {
                            declaration.record(kind, nodes.len() - 1);
                        }
                        continue;
                    }

                    stack.push(local_name);
                    if stack.last().map(Vec::as_slice) == Some(DEPENDENCY_ELEMENT) {
                        open_dependencies.push((stack.len(), Declaration::default()));
                    }
                    nodes.push(Node::Event(Event::Start(start.into_owned())));
                }
                Event::Empty(start) => {
                    if stack.is_empty() {
                        has_root = true;
                    }
                    let local_name = start.local_name().as_ref().to_vec();
                    match Self::field_kind(&local_name, stack.len(), &open_dependencies) {
                        Some(kind) => {
                            nodes.push(Node::Field(Field::parsed(
                                start.into_owned(),
                                Vec::new(),
                                None,
                                String::new(),
                            )));
                            if let Some((_, declaration)) = open_dependencies.last_mut() {
                                declaration.record(kind, nodes.len() - 1);
                            }
                        }
                        None => nodes.push(Node::Event(Event::Empty(start.into_owned()))),
                    }
                }
                Event::End(end) => {
                    if open_dependencies
                        .last()
                        .is_some_and(|(depth, _)| *depth == stack.len())
                    {
                        if let Some((_, declaration)) = open_dependencies.pop() {
                            if let (Some(group), Some(artifact)) =
                                (declaration.group_id, declaration.artifact_id)
                            {
                                declarations.push((group, artifact, declaration.version));
                            }
                        }
                    }
                    stack.pop();
                    nodes.push(Node::Event(Event::End(end.into_owned())));
                }
                Event::Eof => break,
                other => nodes.push(Node::Event(other.into_owned())),
            }
        }

        if let Some(unclosed) = stack.last() {
            anyhow::bail!(
                "Unexpected end of document: element <{}> is not closed",
                String::from_utf8_lossy(unclosed)
            );
        }
        if !has_root {
            anyhow::bail!("Document has no root element");
        }

        Ok(Self {
            nodes,
            declarations,
        })
    }

    /// Field kind of an element at `depth` if it is a direct child of the innermost open `<dependency>`.
    fn field_kind(
        local_name: &[u8],
        depth: usize,
        open_dependencies: &[(usize, Declaration)],
    ) -> Option<FieldKind> {
        match open_dependencies.last() {
            Some((dependency_depth, _)) if *dependency_depth == depth => {
                FieldKind::from_local_name(local_name)
            }
            _ => None,
        }
    }

    /// Reads the content of a coordinate field up to and including its end tag.
    fn read_field(
        reader: &mut Reader<&[u8]>,
        local_name: &[u8],
    ) -> Result<(Vec<Event<'static>>, BytesEnd<'static>, String)> {
        let element = String::from_utf8_lossy(local_name).into_owned();
        let mut content = Vec::new();
        let mut value = String::new();

        loop {
            let event = reader
                .read_event()
                .with_context(|| format!("Malformed XML inside <{}>", element))?;
            match event {
                Event::Text(text) => {
                    value.push_str(&text.unescape()?);
                    content.push(Event::Text(text.into_owned()));
                }
                Event::CData(cdata) => {
                    value.push_str(&String::from_utf8_lossy(&cdata));
                    content.push(Event::CData(cdata.into_owned()));
                }
                Event::Comment(comment) => content.push(Event::Comment(comment.into_owned())),
                Event::End(end) => return Ok((content, end.into_owned(), value.trim().to_string())),
                Event::Eof => anyhow::bail!("Unexpected end of document inside <{}>", element),
                _ => anyhow::bail!("Unexpected markup inside <{}>", element),
            }
        }
    }

    fn field(&self, index: usize) -> Option<&Field> {
        match self.nodes.get(index) {
            Some(Node::Field(field)) => Some(field),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        match self.nodes.get_mut(index) {
            Some(Node::Field(field)) => Some(field),
            _ => None,
        }
    }

    /// Every `<dependency>` declaration with both a group and an artifact id, in document order.
    pub fn declarations(&self) -> Vec<DeclaredDependency> {
        self.declarations
            .iter()
            .filter_map(|&(group, artifact, version)| {
                Some(DeclaredDependency {
                    group_id: self.field(group)?.value.clone(),
                    artifact_id: self.field(artifact)?.value.clone(),
                    version: version.and_then(|v| self.field(v)).map(|f| f.value.clone()),
                })
            })
            .collect()
    }

    /// Rewrites every declaration of `dependency`'s original coordinate to its specialized one.
    ///
    /// Declarations are matched on the group and artifact they were parsed
    /// with, so a member never matches a declaration another member rewrote.
    /// A declaration without a `<version>` keeps inheriting its managed version.
    /// Returns the number of declarations rewritten.
    pub fn apply(&mut self, dependency: &SpecializedDependency) -> usize {
        let original = dependency.original();
        let specialized = dependency.specialized();

        let matching: Vec<(usize, usize, Option<usize>)> = self
            .declarations
            .iter()
            .copied()
            .filter(|&(group, artifact, _)| {
                match (self.field(group), self.field(artifact)) {
                    (Some(g), Some(a)) => dependency.matches_original(&g.original, &a.original),
                    _ => false,
                }
            })
            .collect();

        if matching.len() > 1 {
            tracing::warn!(
                coordinate = %original,
                declarations = matching.len(),
                "descriptor declares the same dependency more than once; rewriting all of them"
            );
        }

        for &(group, artifact, version) in &matching {
            if let Some(field) = self.field_mut(group) {
                field.set(specialized.group_id.as_str());
            }
            if let Some(field) = self.field_mut(artifact) {
                field.set(specialized.artifact_id.as_str());
            }
            if let Some(field) = version.and_then(|v| self.field_mut(v)) {
                field.set(specialized.version.as_str());
            }
        }

        matching.len()
    }

    /// Applies every member; returns the total number of declarations rewritten.
    pub fn apply_all(&mut self, dependencies: &[SpecializedDependency]) -> usize {
        dependencies.iter().map(|d| self.apply(d)).sum()
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            match node {
                Node::Event(event) => writer.write_event(event.borrow())?,
                Node::Field(field) => field.write(&mut writer)?,
            }
        }
        String::from_utf8(writer.into_inner()).context("Descriptor is not valid UTF-8")
    }
}
