use nalgebra::{ClosedSub, Point3, Scalar, Vector3};

#[inline]
fn partial_min<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[inline]
fn partial_max<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// 3D axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB<T: Scalar + PartialOrd> {
    min: Point3<T>,
    max: Point3<T>,
}

impl<T: Scalar + ClosedSub + PartialOrd + Copy> AABB<T> {
    /// Creates a new AABB from the given minimum and maximum coordinates. Panics if the minimum position is
    /// not less than or equal to the maximum position
    /// ```
    /// # use pckd_core::math::AABB;
    /// let bounds = AABB::from_min_max(nalgebra::Point3::new(0.0, 0.0, 0.0), nalgebra::Point3::new(1.0, 1.0, 1.0));
    /// ```
    pub fn from_min_max(min: Point3<T>, max: Point3<T>) -> Self {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            panic!("AABB::from_min_max: Minimum position must be <= maximum position!");
        }
        Self { min, max }
    }

    /// Like [from_min_max](AABB::from_min_max), but performs no checks that min <= max
    pub fn from_min_max_unchecked(min: Point3<T>, max: Point3<T>) -> Self {
        Self { min, max }
    }

    /// Computes the tightest AABB around all the given points. Returns `None` if `points` is empty
    /// ```
    /// # use pckd_core::math::AABB;
    /// # use nalgebra::Point3;
    /// let bounds = AABB::from_points(vec![Point3::new(1.0, -2.0, 0.5), Point3::new(-1.0, 3.0, 0.0)]).unwrap();
    /// assert_eq!(*bounds.min(), Point3::new(-1.0, -2.0, 0.0));
    /// assert_eq!(*bounds.max(), Point3::new(1.0, 3.0, 0.5));
    ///
    /// assert!(AABB::<f32>::from_points(std::iter::empty()).is_none());
    /// ```
    pub fn from_points<I: IntoIterator<Item = Point3<T>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let initial = Self::from_min_max_unchecked(first, first);
        Some(iter.fold(initial, |bounds, point| {
            AABB::extend_with_point(&bounds, &point)
        }))
    }

    /// Returns the minimum point of this AABB
    pub fn min(&self) -> &Point3<T> {
        &self.min
    }

    /// Returns the maximum point of this AABB
    pub fn max(&self) -> &Point3<T> {
        &self.max
    }

    /// Returns the extent of this AABB. The extent is the size between the minimum and maximum position of this AABB
    /// ```
    /// # use pckd_core::math::AABB;
    /// let bounds = AABB::from_min_max_unchecked(nalgebra::Point3::new(0.0, 0.0, 0.0), nalgebra::Point3::new(1.0, 2.0, 3.0));
    /// assert_eq!(bounds.extent(), nalgebra::Vector3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn extent(&self) -> Vector3<T> {
        self.max - self.min
    }

    /// Returns true if the given point is contained within this AABB. Points right on the boundary
    /// count as contained
    pub fn contains(&self, point: &Point3<T>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Computes the smallest AABB that fully contains both `a` and `b`
    pub fn union(a: &AABB<T>, b: &AABB<T>) -> Self {
        Self {
            min: Point3::new(
                partial_min(a.min.x, b.min.x),
                partial_min(a.min.y, b.min.y),
                partial_min(a.min.z, b.min.z),
            ),
            max: Point3::new(
                partial_max(a.max.x, b.max.x),
                partial_max(a.max.y, b.max.y),
                partial_max(a.max.z, b.max.z),
            ),
        }
    }

    /// Extends the given AABB so that it contains the given point
    pub fn extend_with_point(bounds: &AABB<T>, point: &Point3<T>) -> AABB<T> {
        Self {
            min: Point3::new(
                partial_min(bounds.min.x, point.x),
                partial_min(bounds.min.y, point.y),
                partial_min(bounds.min.z, point.z),
            ),
            max: Point3::new(
                partial_max(bounds.max.x, point.x),
                partial_max(bounds.max.y, point.y),
                partial_max(bounds.max.z, point.z),
            ),
        }
    }
}

impl AABB<f32> {
    /// Returns the center point of this AABB
    /// ```
    /// # use pckd_core::math::AABB;
    /// let bounds = AABB::from_min_max_unchecked(nalgebra::Point3::new(-1.0, 0.0, 2.0), nalgebra::Point3::new(1.0, 4.0, 2.0));
    /// assert_eq!(bounds.center(), nalgebra::Point3::new(0.0, 2.0, 2.0));
    /// ```
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}
