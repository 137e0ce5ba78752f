//! Virtual objects and the per-file link table they resolve through.

use super::writer::Tag;
use super::{parsed, DirectiveError, RecordDecoder};
use crate::parser::parsers::{color, rect};
use crate::parser::types::{Rect, Segment};

use alloc::string::String;
use alloc::vec::Vec;
use log::debug;
use nom::number::complete::{le_i16, le_u16};
use nom::sequence::tuple;

/// A link record of a file, with the target resolved to a file identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// 1-indexed file number as stored.
    pub file_ref: u16,
    pub name: String,
    /// `None` when `file_ref` names no file of the archive.
    pub target: Option<String>,
    /// Where the virtual object using this link was drawn, once it has been decoded.
    pub geometry: Option<Rect>,
}

/// The link records of one file. The n-th virtual object of the file uses the n-th entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    entries: Vec<ResolvedLink>,
    cursor: usize,
}

impl LinkTable {
    pub fn new() -> LinkTable {
        return LinkTable::default();
    }

    pub fn push(&mut self, link: ResolvedLink) {
        self.entries.push(link);
    }

    /// Hand out the next unused entry.
    pub fn next_link(&mut self) -> Option<&mut ResolvedLink> {
        let link = self.entries.get_mut(self.cursor)?;
        self.cursor += 1;
        return Some(link);
    }

    pub fn entries(&self) -> &[ResolvedLink] {
        return &self.entries;
    }

    pub fn into_entries(self) -> Vec<ResolvedLink> {
        return self.entries;
    }
}

/// Layout: `view RECT, height H, chsz, frcol, chcol, tbcol, bgcol, dlen, data`.
pub fn virtual_object(rec: &mut RecordDecoder, seg: &Segment) -> Result<(), DirectiveError> {
    let (_, (view, height, chsz, frcol, chcol, tbcol, bgcol)) = parsed(
        seg,
        tuple((rect, le_i16, le_u16, color, color, color, color))(seg.body),
    )?;

    let mut tag = Tag::new("link");
    match rec.ctx.links.next_link() {
        Some(link) => {
            link.geometry = Some(view);
            tag = tag.attr_opt("id", link.target.as_ref()).attr("name", &link.name);
        }
        None => debug!("virtual object at {} has no link record", rec.offset),
    }
    tag = tag
        .attr("vobjleft", view.left)
        .attr("vobjtop", view.top)
        .attr("vobjright", view.right)
        .attr("vobjbottom", view.bottom)
        .attr("height", height)
        .attr("chsz", chsz)
        .attr("frcol", frcol)
        .attr("chcol", chcol)
        .attr("tbcol", tbcol)
        .attr("bgcol", bgcol);

    if rec.state.in_figure() {
        rec.out.empty(tag.attr("z", rec.state.z_index));
        rec.state.z_index += 1;
        return Ok(());
    }
    let saved = rec.state.decorations.suspend(&mut rec.out);
    rec.out.empty(tag);
    rec.state.decorations.resume(saved, &mut rec.out);
    return Ok(());
}
