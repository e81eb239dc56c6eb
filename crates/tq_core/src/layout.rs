use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Byte spans of the two decoded regions inside the raw buffer.
///
/// These offsets are valid only against the buffer they were derived from.
/// Saving re-derives the output layout from scratch; offsets are never
/// carried across to a freshly written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLayout {
    pub file_len: usize,
    pub item: ByteRange,
    pub equipment: Option<ByteRange>,
}

impl RegionLayout {
    pub fn validate(&self) -> io::Result<()> {
        if self.item.end < self.item.start {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid item region {}..{}", self.item.start, self.item.end),
            ));
        }

        let mut expected_end = self.item.end;
        if let Some(equipment) = self.equipment {
            if equipment.start < self.item.end || equipment.end < equipment.start {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "equipment region {}..{} overlaps item region ending at {}",
                        equipment.start, equipment.end, self.item.end
                    ),
                ));
            }
            expected_end = equipment.end;
        }

        if expected_end > self.file_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "region layout runs past end of file: {} > {}",
                    expected_end, self.file_len
                ),
            ));
        }

        Ok(())
    }
}
