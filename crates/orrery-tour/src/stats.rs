// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Statistics collected during one tour run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TourStatistics {
    /// Cities appended during construction.
    pub cities_appended: u64,
    /// Edge pairs examined during improvement.
    pub exchanges_examined: u64,
    /// Improving exchanges applied.
    pub exchanges_applied: u64,
    /// Full improvement scans completed.
    pub scans_completed: u64,
}

impl TourStatistics {
    #[inline]
    pub fn on_city_appended(&mut self) {
        self.cities_appended = self.cities_appended.saturating_add(1);
    }

    #[inline]
    pub fn on_exchange_examined(&mut self) {
        self.exchanges_examined = self.exchanges_examined.saturating_add(1);
    }

    #[inline]
    pub fn on_exchange_applied(&mut self) {
        self.exchanges_applied = self.exchanges_applied.saturating_add(1);
    }

    #[inline]
    pub fn on_scan_completed(&mut self) {
        self.scans_completed = self.scans_completed.saturating_add(1);
    }
}

impl std::fmt::Display for TourStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour Statistics:")?;
        writeln!(f, "  Cities appended:    {}", self.cities_appended)?;
        writeln!(f, "  Exchanges examined: {}", self.exchanges_examined)?;
        writeln!(f, "  Exchanges applied:  {}", self.exchanges_applied)?;
        writeln!(f, "  Scans completed:    {}", self.scans_completed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut s = TourStatistics::default();
        s.on_city_appended();
        s.on_exchange_examined();
        s.on_exchange_examined();
        s.on_exchange_applied();
        s.on_scan_completed();

        assert_eq!(s.cities_appended, 1);
        assert_eq!(s.exchanges_examined, 2);
        assert_eq!(s.exchanges_applied, 1);
        assert_eq!(s.scans_completed, 1);
    }
}
