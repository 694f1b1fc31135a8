//! Read-only tree projection of a composition.
//!
//! Three levels under a synthetic root: segments, their sequences, and the
//! resources of each sequence. Nodes live in one arena and refer to each other
//! by index. Only resource nodes carry column data; segment and sequence nodes
//! have a display label instead.

use imfdiff_imf::timeline::EXTERNAL_REEL;
use imfdiff_imf::{ImfPackage, ResourceKind, Timeline, TimelineEvent};
use smallvec::SmallVec;
use tracing::debug;

/// Index of a node in a [`CplTreeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Columns shown for resource rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    RecordIn,
    RecordOut,
    SourceIn,
    SourceOut,
    Rate,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::RecordIn,
        Column::RecordOut,
        Column::SourceIn,
        Column::SourceOut,
        Column::Rate,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::RecordIn => "Record In",
            Self::RecordOut => "Record Out",
            Self::SourceIn => "Source In",
            Self::SourceOut => "Source Out",
            Self::Rate => "Rate",
        }
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Segment,
    Sequence(ResourceKind),
    Resource(ResourceKind),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    row: usize,
    children: SmallVec<[NodeId; 4]>,
    label: String,
    /// Empty for everything but resources
    columns: Vec<String>,
}

/// Arena-backed composition tree with item-view style lookups.
#[derive(Debug, Clone)]
pub struct CplTreeModel {
    nodes: Vec<Node>,
}

impl CplTreeModel {
    /// Project the composition of `package`.
    pub fn from_package(package: &ImfPackage) -> Self {
        Self::build(&package.timeline())
    }

    /// Project a placed timeline. Record columns come from the same placement the
    /// exporters use.
    pub fn build(timeline: &Timeline<'_>) -> Self {
        let mut model = Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                row: 0,
                children: SmallVec::new(),
                label: timeline.composition().title.clone(),
                columns: Vec::new(),
            }],
        };
        let root = model.root();

        for segment in timeline.segments() {
            let segment_id = model.push(
                root,
                NodeKind::Segment,
                format!("Segment {}", segment.index + 1),
                Vec::new(),
            );

            let mut images = 0;
            let mut audio = 0;
            for sequence in &segment.sequences {
                let kind = sequence.sequence.kind;
                let ordinal = match kind {
                    ResourceKind::Image => {
                        images += 1;
                        images
                    }
                    ResourceKind::Audio => {
                        audio += 1;
                        audio
                    }
                };
                let sequence_id = model.push(
                    segment_id,
                    NodeKind::Sequence(kind),
                    format!("{} {}", kind_name(kind), ordinal),
                    Vec::new(),
                );

                for event in &sequence.events {
                    let columns = resource_columns(event);
                    let label = columns[Column::Name.index()].clone();
                    model.push(sequence_id, NodeKind::Resource(event.kind()), label, columns);
                }
            }
        }

        debug!(nodes = model.nodes.len(), "Built CPL tree");
        model
    }

    fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        label: String,
        columns: Vec<String>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let siblings = &mut self.nodes[parent.0].children;
        let row = siblings.len();
        siblings.push(id);
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            row,
            children: SmallVec::new(),
            label,
            columns,
        });
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The synthetic top-level node; its children are the segments.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_count(self.root()) == 0
    }

    pub fn child_at(&self, node: NodeId, row: usize) -> Option<NodeId> {
        self.node(node)?.children.get(row).copied()
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    /// Position of `node` among its siblings. The root is row 0.
    pub fn row_of(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, |n| n.row)
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, |n| n.children.len())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.node(node).map(|n| n.kind)
    }

    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    /// Header text for `column`, if it exists.
    pub fn header(&self, column: usize) -> Option<&'static str> {
        Column::from_index(column).map(Column::header)
    }

    /// Cell text. Segment and sequence nodes, as well as out-of-range columns,
    /// yield an empty string.
    pub fn column_value(&self, node: NodeId, column: usize) -> &str {
        self.node(node)
            .and_then(|n| n.columns.get(column))
            .map_or("", String::as_str)
    }

    /// Display label: `Segment 2`, `Audio 1`, a resource's name, or the
    /// composition title for the root.
    pub fn label(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.label.as_str())
    }

    /// Depth-first iteration over every node below `node`.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }
}

fn kind_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Image => "Image",
        ResourceKind::Audio => "Audio",
    }
}

fn resource_columns(event: &TimelineEvent<'_>) -> Vec<String> {
    Column::ALL
        .iter()
        .map(|column| match column {
            Column::Name => event.file_name().unwrap_or(EXTERNAL_REEL).to_string(),
            Column::RecordIn => event.record_in.to_string(),
            Column::RecordOut => event.record_out.to_string(),
            Column::SourceIn => event.source_in.to_string(),
            Column::SourceOut => event.source_out.to_string(),
            Column::Rate => event.resource.edit_rate.to_string(),
        })
        .collect()
}
