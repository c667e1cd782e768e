//! Sort specification for the book table.

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Average rating of the work.
    Ratings,
    /// Author names as listed.
    Author,
    /// Work title.
    Title,
    /// First publish year, compared as text.
    Year,
    /// Primary subject.
    Subject,
    /// Birth dates of the work's authors.
    AuthorBirthDate,
    /// Best-known works of the work's authors.
    AuthorTopWork,
}

impl SortField {
    /// All fields in table column order.
    pub const ALL: [SortField; 7] = [
        SortField::Ratings,
        SortField::Author,
        SortField::Title,
        SortField::Year,
        SortField::Subject,
        SortField::AuthorBirthDate,
        SortField::AuthorTopWork,
    ];

    /// Column header text, also used as the CSV header.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Ratings => "Ratings Average",
            SortField::Author => "Author Name",
            SortField::Title => "Title",
            SortField::Year => "First Publish Year",
            SortField::Subject => "Subjects",
            SortField::AuthorBirthDate => "Author Birth Date",
            SortField::AuthorTopWork => "Author Top Work",
        }
    }

    /// Stable machine name.
    pub fn key(self) -> &'static str {
        match self {
            SortField::Ratings => "ratings",
            SortField::Author => "author",
            SortField::Title => "title",
            SortField::Year => "year",
            SortField::Subject => "subject",
            SortField::AuthorBirthDate => "authorBirthDate",
            SortField::AuthorTopWork => "authorTopWork",
        }
    }

    /// Field for a 1-based column number.
    pub fn from_column(column: usize) -> Option<Self> {
        column
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }
}

/// Order applied to the active sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow glyph for the column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Current sort: no field means listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// Active column, if any.
    pub field: Option<SortField>,
    /// Direction applied to `field`.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Sort by `field` in `direction`.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Select `field`: the current field toggles direction, any other field
    /// starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        let direction = if self.field == Some(field) {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Direction marker for `field`, if it is the sorted column.
    pub fn arrow_for(&self, field: SortField) -> Option<&'static str> {
        (self.field == Some(field)).then(|| self.direction.arrow())
    }
}
