//! Page strip calculation for the listing view.
//!
//! Everything here is pure and cheap enough to recompute on every render.

/// Pages that get a dedicated shortcut button when they are in range
pub const JUMP_MILESTONES: [usize; 5] = [5, 10, 25, 50, 100];

/// Strips with at most this many pages show every page
pub const MAX_VISIBLE_PAGES: usize = 5;

const MAX_QUICK_JUMPS: usize = 5;
const MAX_BACK_JUMPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<PageEntry>,
    pub quick_jumps: Vec<usize>,
}

impl PageWindow {
    /// An empty window means the pagination control is not shown at all
    pub fn is_hidden(&self) -> bool {
        self.pages.is_empty()
    }
}

/// `ceil(total_count / items_per_page)`, zero for an empty catalog
pub fn total_pages(total_count: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        0
    } else {
        total_count.div_ceil(items_per_page)
    }
}

pub fn compute_window(current_page: usize, total_pages: usize) -> PageWindow {
    if total_pages <= 1 {
        return PageWindow::default();
    }
    PageWindow {
        pages: page_numbers(current_page, total_pages),
        quick_jumps: quick_jumps(current_page, total_pages),
    }
}

fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageEntry> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageEntry::Page).collect();
    }

    let mut pages = vec![PageEntry::Page(1)];
    if current_page > 3 {
        pages.push(PageEntry::Ellipsis);
    }

    let start = current_page.saturating_sub(1).max(2);
    let end = current_page.saturating_add(1).min(total_pages - 1);
    pages.extend((start..=end).map(PageEntry::Page));

    if current_page.saturating_add(2) < total_pages {
        pages.push(PageEntry::Ellipsis);
    }
    pages.push(PageEntry::Page(total_pages));
    pages
}

fn quick_jumps(current_page: usize, total_pages: usize) -> Vec<usize> {
    let forward = JUMP_MILESTONES
        .iter()
        .copied()
        .filter(|&m| m > current_page && m <= total_pages);

    let mut jumps = Vec::with_capacity(MAX_QUICK_JUMPS);
    if current_page > 10 {
        let behind: Vec<usize> = JUMP_MILESTONES
            .iter()
            .copied()
            .filter(|&m| m < current_page && m <= total_pages)
            .collect();
        let skip = behind.len().saturating_sub(MAX_BACK_JUMPS);
        jumps.extend(behind.into_iter().skip(skip));
    }
    jumps.extend(forward);
    jumps.truncate(MAX_QUICK_JUMPS);
    jumps
}

/// True when a quick jump leads backwards from `current_page`
pub fn is_back_jump(jump: usize, current_page: usize) -> bool {
    jump < current_page
}

/// Parse the "go to page" input. Only whole numbers inside `1..=total_pages` are accepted.
pub fn parse_go_to(input: &str, total_pages: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|page| (1..=total_pages).contains(page))
}

/// Previous/next navigation over a 1-based page range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub current_page: usize,
    pub total_pages: usize,
}

impl PageCursor {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages,
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn prev_page(&self) -> Option<usize> {
        self.can_go_prev().then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.can_go_next().then(|| self.current_page + 1)
    }
}
