//! UI state - which page the root component shows

/// Top-level page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Jobs,
    CourseDetails,
}

impl Page {
    pub fn all() -> [Page; 2] {
        [Page::Jobs, Page::CourseDetails]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Jobs => "Jobs",
            Page::CourseDetails => "Course Details",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Jobs => 0,
            Page::CourseDetails => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_order() {
        let names: Vec<&str> = Page::all().iter().map(Page::name).collect();
        assert_eq!(names, vec!["Jobs", "Course Details"]);
        assert_eq!(Page::CourseDetails.index(), 1);
    }
}
