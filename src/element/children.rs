use super::Node;

/// Marker type for a single child (anything convertible into a [`Node`])
pub struct SingleChild;

/// Marker type for a sequence of children
pub struct ManyChildren;

/// Trait for values that can be appended to an element's children.
///
/// The marker parameter disambiguates a single node from an iterator of
/// nodes, which is the same split the element tree format makes between a
/// lone `children` value and a `children` array.
pub trait IntoChildren<Marker = SingleChild> {
    fn append_to(self, children: &mut Vec<Node>);
}

impl<N> IntoChildren<SingleChild> for N
where
    N: Into<Node>,
{
    fn append_to(self, children: &mut Vec<Node>) {
        children.push(self.into());
    }
}

impl<I> IntoChildren<ManyChildren> for I
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    fn append_to(self, children: &mut Vec<Node>) {
        children.extend(self.into_iter().map(Into::into));
    }
}
