//! Named, ordered collections of meshes.
//!
//! A [`MultiBlock`] holds blocks in insertion order; each block is either a
//! [`SurfaceMesh`] or another nested `MultiBlock`. Geometric sources produce
//! their output in this form, one named block per part.

use glam::Vec3;

use crate::bounds::Bounds;
use crate::error::{Result, VistaError};
use crate::mesh::SurfaceMesh;

/// A single entry of a [`MultiBlock`].
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A leaf mesh.
    Mesh(SurfaceMesh),
    /// A nested composite.
    Composite(MultiBlock),
}

impl Block {
    /// Returns the leaf mesh, if this block is one.
    #[must_use]
    pub fn as_mesh(&self) -> Option<&SurfaceMesh> {
        match self {
            Block::Mesh(m) => Some(m),
            Block::Composite(_) => None,
        }
    }

    /// Returns the leaf mesh mutably, if this block is one.
    pub fn as_mesh_mut(&mut self) -> Option<&mut SurfaceMesh> {
        match self {
            Block::Mesh(m) => Some(m),
            Block::Composite(_) => None,
        }
    }

    /// Returns the nested composite, if this block is one.
    #[must_use]
    pub fn as_composite(&self) -> Option<&MultiBlock> {
        match self {
            Block::Mesh(_) => None,
            Block::Composite(c) => Some(c),
        }
    }

    /// Returns the bounding box of the block.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Block::Mesh(m) => m.bounds(),
            Block::Composite(c) => c.bounds(),
        }
    }
}

impl From<SurfaceMesh> for Block {
    fn from(mesh: SurfaceMesh) -> Self {
        Block::Mesh(mesh)
    }
}

impl From<MultiBlock> for Block {
    fn from(multi: MultiBlock) -> Self {
        Block::Composite(multi)
    }
}

/// An ordered collection of named blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiBlock {
    blocks: Vec<(String, Block)>,
}

impl MultiBlock {
    /// Creates an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composite of empty meshes with the given names.
    pub fn with_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            blocks: names
                .iter()
                .map(|n| (n.as_ref().to_string(), Block::Mesh(SurfaceMesh::default())))
                .collect(),
        }
    }

    /// Appends a block.
    ///
    /// When `name` is `None` a name of the form `Block-NN` is generated.
    pub fn append(&mut self, name: Option<&str>, block: impl Into<Block>) {
        let name = name.map_or_else(|| format!("Block-{:02}", self.blocks.len()), str::to_string);
        self.blocks.push((name, block.into()));
    }

    /// Inserts a block before `index`; `index == len()` appends.
    ///
    /// When `name` is `None` a name of the form `Block-NN` is generated from
    /// the insertion index.
    pub fn insert(
        &mut self,
        index: usize,
        name: Option<&str>,
        block: impl Into<Block>,
    ) -> Result<()> {
        let len = self.blocks.len();
        if index > len {
            return Err(VistaError::IndexOutOfRange { index, len });
        }
        let name = name.map_or_else(|| format!("Block-{index:02}"), str::to_string);
        self.blocks.insert(index, (name, block.into()));
        Ok(())
    }

    /// Reverses the order of the top-level blocks, names included.
    pub fn reverse(&mut self) {
        self.blocks.reverse();
    }

    /// Removes nested composites left without blocks and, when `empty` is
    /// set, meshes without points. Recurses into nested composites.
    pub fn clean(&mut self, empty: bool) {
        self.blocks.retain_mut(|(_, block)| match block {
            Block::Mesh(m) => !(empty && m.n_points() == 0),
            Block::Composite(c) => {
                c.clean(empty);
                !c.is_empty()
            }
        });
    }

    /// Returns the number of top-level blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if there are no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the block names in order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.blocks.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns an iterator over `(name, block)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.blocks.iter().map(|(n, b)| (n.as_str(), b))
    }

    /// Returns a mutable iterator over `(name, block)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Block)> {
        self.blocks.iter_mut().map(|(n, b)| (n.as_str(), b))
    }

    /// Returns the index of the first block with the given name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.blocks.iter().position(|(n, _)| n == name)
    }

    /// Gets a block by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    /// Gets a mutable block by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    /// Gets a leaf mesh by name.
    #[must_use]
    pub fn mesh(&self, name: &str) -> Option<&SurfaceMesh> {
        self.get(name).and_then(Block::as_mesh)
    }

    /// Gets a mutable leaf mesh by name.
    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut SurfaceMesh> {
        self.get_mut(name).and_then(Block::as_mesh_mut)
    }

    /// Gets a block by position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index).map(|(_, b)| b)
    }

    /// Returns the name of the block at `index`.
    #[must_use]
    pub fn block_name(&self, index: usize) -> Option<&str> {
        self.blocks.get(index).map(|(n, _)| n.as_str())
    }

    /// Renames the block at `index`.
    pub fn set_block_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let len = self.blocks.len();
        let entry = self
            .blocks
            .get_mut(index)
            .ok_or(VistaError::IndexOutOfRange { index, len })?;
        entry.0 = name.into();
        Ok(())
    }

    /// Replaces the block at `index`, keeping its name.
    pub fn replace(&mut self, index: usize, block: impl Into<Block>) -> Result<()> {
        let len = self.blocks.len();
        let entry = self
            .blocks
            .get_mut(index)
            .ok_or(VistaError::IndexOutOfRange { index, len })?;
        entry.1 = block.into();
        Ok(())
    }

    /// Removes and returns the block with the given name.
    pub fn pop(&mut self, name: &str) -> Result<Block> {
        let index = self
            .index_of(name)
            .ok_or_else(|| VistaError::BlockNotFound(name.to_string()))?;
        Ok(self.blocks.remove(index).1)
    }

    /// Visits every leaf mesh, depth first.
    pub fn for_each_mesh<'a>(&'a self, f: &mut impl FnMut(&'a SurfaceMesh)) {
        for (_, block) in &self.blocks {
            match block {
                Block::Mesh(m) => f(m),
                Block::Composite(c) => c.for_each_mesh(f),
            }
        }
    }

    /// Visits every leaf mesh mutably, depth first.
    pub fn for_each_mesh_mut(&mut self, f: &mut impl FnMut(&mut SurfaceMesh)) {
        for (_, block) in &mut self.blocks {
            match block {
                Block::Mesh(m) => f(m),
                Block::Composite(c) => c.for_each_mesh_mut(f),
            }
        }
    }

    /// Bounds across all blocks, or `None` if no block has points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.blocks
            .iter()
            .filter_map(|(_, b)| b.bounds())
            .reduce(|a, b| a.union(&b))
    }

    /// Center of the combined bounding box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.bounds().map_or(Vec3::ZERO, |b| b.center())
    }

    /// Length of the diagonal of the combined bounding box.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.bounds().map_or(0.0, |b| b.length())
    }

    /// Total number of points across all leaves.
    #[must_use]
    pub fn n_points(&self) -> usize {
        let mut n = 0;
        self.for_each_mesh(&mut |m| n += m.n_points());
        n
    }

    /// Total number of faces across all leaves.
    #[must_use]
    pub fn n_faces(&self) -> usize {
        let mut n = 0;
        self.for_each_mesh(&mut |m| n += m.n_faces());
        n
    }
}

impl<S: Into<String>, B: Into<Block>> Extend<(S, B)> for MultiBlock {
    fn extend<I: IntoIterator<Item = (S, B)>>(&mut self, iter: I) {
        self.blocks
            .extend(iter.into_iter().map(|(n, b)| (n.into(), b.into())));
    }
}

impl IntoIterator for MultiBlock {
    type Item = (String, Block);
    type IntoIter = std::vec::IntoIter<(String, Block)>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<S: Into<String>, B: Into<Block>> FromIterator<(S, B)> for MultiBlock {
    fn from_iter<I: IntoIterator<Item = (S, B)>>(iter: I) -> Self {
        Self {
            blocks: iter
                .into_iter()
                .map(|(n, b)| (n.into(), b.into()))
                .collect(),
        }
    }
}
