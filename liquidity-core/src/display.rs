use std::fmt::{Display, Formatter};

pub fn display_option<T>(opt: Option<T>) -> DisplayOption<T> {
    DisplayOption(opt)
}

pub struct DisplayOption<T>(Option<T>);

impl<T: Display> Display for DisplayOption<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => f.write_str("null"),
            Some(val) => val.fmt(f),
        }
    }
}

pub fn display_vec<T>(items: &[T]) -> DisplayVec<'_, T> {
    DisplayVec(items)
}

pub struct DisplayVec<'a, T>(&'a [T]);

impl<'a, T: Display> Display for DisplayVec<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.fmt(f)?;
        }
        f.write_str("]")
    }
}
