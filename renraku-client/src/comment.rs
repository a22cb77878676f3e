use std::collections::{HashMap, HashSet};

use crate::api::{Comment, CommentId, User, UserId};

/// A comment and its reply subtree. Every sibling list, this node's
/// included, is ascending by creation time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Total number of comments below this one
    pub fn descendant_count(&self) -> usize {
        self.replies.iter().map(|r| 1 + r.descendant_count()).sum()
    }
}

/// Rebuild the reply forest from a flat comment list.
///
/// A comment whose `parent_id` is not in the list is kept as a root rather
/// than dropped. Runs on every comment-list render, so the input is moved
/// in and wrapped rather than cloned. Cyclic input is out of contract: the
/// reply graph is a strict forest in practice.
pub fn build_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let known = comments.iter().map(|c| c.id).collect::<HashSet<_>>();
    let mut children: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }
    let mut res = roots
        .into_iter()
        .map(|c| attach_replies(c, &mut children))
        .collect::<Vec<_>>();
    res.sort_by(|a, b| a.comment.created_at.cmp(&b.comment.created_at));
    res
}

fn attach_replies(
    comment: Comment,
    children: &mut HashMap<CommentId, Vec<Comment>>,
) -> CommentNode {
    let mut replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|c| attach_replies(c, children))
        .collect::<Vec<_>>();
    replies.sort_by(|a, b| a.comment.created_at.cmp(&b.comment.created_at));
    CommentNode { comment, replies }
}

/// Display names referenced as `@{Name}` in `content`, in order of
/// appearance. Unterminated tokens are ignored.
pub fn extract_mentions(content: &str) -> Vec<&str> {
    let mut res = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("@{") {
        rest = &rest[start + 2..];
        match rest.find('}') {
            None => break,
            Some(end) => {
                res.push(&rest[..end]);
                rest = &rest[end + 1..];
            }
        }
    }
    res
}

/// Resolve the `@{Name}` tokens of `content` against the roster.
///
/// Names match case-sensitively; a name shared by several users resolves to
/// all of them. The sender never gets notified about their own comment, so
/// they are excluded from the result. Pure: dispatching notifications for
/// the returned set is the caller's job.
pub fn resolve_mentions(content: &str, roster: &[User], sender: UserId) -> HashSet<UserId> {
    let mut res = HashSet::new();
    for name in extract_mentions(content) {
        res.extend(
            roster
                .iter()
                .filter(|u| u.name == name && u.id != sender)
                .map(|u| u.id),
        );
    }
    res
}
