/*!
Stock level bookkeeping for a single product.

A [`ProductStock`] tracks the units on hand, the units reserved for pending
orders, a reorder threshold and the storage capacity.
!*/

use thiserror::Error;

/// Errors returned by [`ProductStock`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("invalid constructor parameters: the maximum capacity must be positive")]
    InvalidParameters,

    #[error("invalid amount: {0}")]
    InvalidAmount(u32),

    #[error("adding {amount} units to {stock} exceeds the capacity of {max_capacity}")]
    ExceedsCapacity {
        amount: u32,
        stock: u32,
        max_capacity: u32,
    },

    #[error("cannot reserve {requested} units, {available} available")]
    CannotReserve { requested: u32, available: u32 },

    #[error("cannot release {requested} units, {reserved} reserved")]
    InvalidRelease { requested: u32, reserved: u32 },

    #[error("cannot ship {requested} units, {reserved} reserved")]
    CannotShip { requested: u32, reserved: u32 },

    #[error("cannot remove {requested} damaged units, {available} available")]
    InvalidRemoval { requested: u32, available: u32 },

    #[error("invalid capacity: the maximum capacity must be positive")]
    InvalidCapacity,
}

/// Stock levels of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStock {
    stock: u32,
    reserved: u32,
    reorder_threshold: u32,
    max_capacity: u32,
}

impl ProductStock {
    /// Create a new stock record.
    ///
    /// Fails if `max_capacity` is zero.
    pub fn new(
        stock: u32,
        reserved: u32,
        reorder_threshold: u32,
        max_capacity: u32,
    ) -> Result<Self, StockError> {
        if max_capacity == 0 {
            return Err(StockError::InvalidParameters);
        }
        Ok(Self {
            stock,
            reserved,
            reorder_threshold,
            max_capacity,
        })
    }

    /// Units on hand and not reserved.
    #[inline]
    pub fn stock(&self) -> u32 {
        self.stock
    }

    #[inline]
    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    #[inline]
    pub fn reorder_threshold(&self) -> u32 {
        self.reorder_threshold
    }

    #[inline]
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Receive `amount` units.
    ///
    /// Only unreserved units count against the capacity.
    pub fn add_stock(&mut self, amount: u32) -> Result<(), StockError> {
        if amount == 0 {
            return Err(StockError::InvalidAmount(amount));
        }
        match self.stock.checked_add(amount) {
            Some(total) if total <= self.max_capacity => {
                self.stock = total;
                Ok(())
            }
            _ => Err(StockError::ExceedsCapacity {
                amount,
                stock: self.stock,
                max_capacity: self.max_capacity,
            }),
        }
    }

    /// Move `amount` units from the stock to the reservations.
    pub fn reserve(&mut self, amount: u32) -> Result<(), StockError> {
        let reserved = match self.reserved.checked_add(amount) {
            Some(reserved) if amount != 0 && amount <= self.stock => reserved,
            _ => {
                return Err(StockError::CannotReserve {
                    requested: amount,
                    available: self.stock,
                })
            }
        };
        self.stock -= amount;
        self.reserved = reserved;
        Ok(())
    }

    /// Move `amount` reserved units back to the stock.
    pub fn release_reservation(&mut self, amount: u32) -> Result<(), StockError> {
        let stock = match self.stock.checked_add(amount) {
            Some(stock) if amount != 0 && amount <= self.reserved => stock,
            _ => {
                return Err(StockError::InvalidRelease {
                    requested: amount,
                    reserved: self.reserved,
                })
            }
        };
        self.reserved -= amount;
        self.stock = stock;
        Ok(())
    }

    /// Ship `amount` reserved units.
    pub fn ship_reserved(&mut self, amount: u32) -> Result<(), StockError> {
        if amount == 0 || amount > self.reserved {
            return Err(StockError::CannotShip {
                requested: amount,
                reserved: self.reserved,
            });
        }
        self.reserved -= amount;
        Ok(())
    }

    /// Write off `amount` damaged units from the stock.
    pub fn remove_damaged(&mut self, amount: u32) -> Result<(), StockError> {
        if amount == 0 || amount > self.stock {
            return Err(StockError::InvalidRemoval {
                requested: amount,
                available: self.stock,
            });
        }
        self.stock -= amount;
        Ok(())
    }

    /// Return whether the stock has fallen to the reorder threshold.
    #[inline]
    pub fn is_reorder_needed(&self) -> bool {
        self.stock <= self.reorder_threshold
    }

    pub fn update_reorder_threshold(&mut self, value: u32) {
        self.reorder_threshold = value;
    }

    /// Change the capacity. The current stock is kept even if it exceeds
    /// the new capacity.
    pub fn update_max_capacity(&mut self, value: u32) -> Result<(), StockError> {
        if value == 0 {
            return Err(StockError::InvalidCapacity);
        }
        self.max_capacity = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stock() -> ProductStock {
        ProductStock::new(50, 0, 10, 100).unwrap()
    }

    #[test]
    fn zero_capacity_is_invalid() {
        assert_eq!(
            ProductStock::new(0, 0, 0, 0),
            Err(StockError::InvalidParameters)
        );
    }

    #[rstest]
    #[case(50)]
    #[case(1)]
    fn fill_up_to_capacity(mut stock: ProductStock, #[case] amount: u32) {
        stock.add_stock(amount).unwrap();
        assert_eq!(stock.stock(), 50 + amount);
    }

    #[test]
    fn overflowing_add_is_rejected() {
        let mut stock = ProductStock::new(1, 0, 0, u32::MAX).unwrap();
        assert!(matches!(
            stock.add_stock(u32::MAX),
            Err(StockError::ExceedsCapacity { .. })
        ));
        assert_eq!(stock.stock(), 1);
    }

    #[rstest]
    fn reserved_units_do_not_count_against_capacity(mut stock: ProductStock) {
        stock.reserve(50).unwrap();
        stock.add_stock(100).unwrap();
        assert_eq!(stock.stock(), 100);
        assert_eq!(stock.reserved(), 50);
    }

    #[rstest]
    fn reservation_round_trip(mut stock: ProductStock) {
        stock.reserve(20).unwrap();
        assert_eq!((stock.stock(), stock.reserved()), (30, 20));
        stock.release_reservation(5).unwrap();
        assert_eq!((stock.stock(), stock.reserved()), (35, 15));
        stock.ship_reserved(15).unwrap();
        assert_eq!((stock.stock(), stock.reserved()), (35, 0));
    }

    #[rstest]
    fn failed_operations_leave_the_stock_untouched(mut stock: ProductStock) {
        let before = stock.clone();
        assert!(stock.reserve(0).is_err());
        assert!(stock.release_reservation(1).is_err());
        assert!(stock.ship_reserved(1).is_err());
        assert!(stock.remove_damaged(51).is_err());
        assert!(stock.update_max_capacity(0).is_err());
        assert_eq!(stock, before);
    }

    #[rstest]
    #[case(39, false)]
    #[case(40, true)]
    #[case(50, true)]
    fn reorder_at_threshold(mut stock: ProductStock, #[case] damaged: u32, #[case] expected: bool) {
        stock.remove_damaged(damaged).unwrap();
        assert_eq!(stock.is_reorder_needed(), expected);
    }

    #[rstest]
    fn shrinking_capacity_keeps_stock(mut stock: ProductStock) {
        stock.update_max_capacity(20).unwrap();
        assert_eq!(stock.stock(), 50);
        assert!(stock.add_stock(1).is_err());
    }
}
