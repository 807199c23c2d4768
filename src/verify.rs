use crate::error::RangeError;
use crate::layout::MemoryLayout;
use crate::space::AddressSpace;

/// Application statistics record and the outcome of its self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsCheck {
    pub reset_command: u16,
    /// Byte address where the application CRC starts
    pub application_start: u16,
    /// Application length in bytes
    pub application_length: u16,
    pub stat_crc: u16,
    pub calculated_stat_crc: u16,
}

impl StatisticsCheck {
    pub fn application_end(&self) -> u32 {
        self.application_start as u32 + self.application_length as u32
    }

    pub fn matches(&self) -> bool {
        self.stat_crc == self.calculated_stat_crc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationCheck {
    pub app_crc: u16,
    pub calculated_app_crc: u16,
}

impl ApplicationCheck {
    pub fn matches(&self) -> bool {
        self.app_crc == self.calculated_app_crc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    pub statistics: StatisticsCheck,
    pub application: ApplicationCheck,
}

impl VerificationReport {
    pub fn stat_crc_matches(&self) -> bool {
        self.statistics.matches()
    }

    pub fn app_crc_matches(&self) -> bool {
        self.application.matches()
    }

    /// Both CRCs match.
    pub fn passed(&self) -> bool {
        self.stat_crc_matches() && self.app_crc_matches()
    }
}

/// Integrity checks of a full ILC memory dump.
pub struct IlcVerifier<'a> {
    space: &'a AddressSpace,
}

impl<'a> IlcVerifier<'a> {
    pub fn new(space: &'a AddressSpace) -> Self {
        Self { space }
    }

    pub fn space(&self) -> &'a AddressSpace {
        self.space
    }

    /// Reads the statistics record and recomputes its CRC.
    pub fn statistics(&self) -> Result<StatisticsCheck, RangeError> {
        if !self
            .space
            .has_range(MemoryLayout::STAT_ADDR_START, MemoryLayout::STAT_RECORD_LEN)
        {
            return Err(RangeError::new(
                MemoryLayout::STAT_ADDR_START,
                MemoryLayout::STAT_RECORD_LEN,
            )
            .with_context(RangeError::STATISTICS));
        }

        let reset_command = self.space.read_word16(MemoryLayout::RESET_CMD_ADDR);
        let application_start = self.space.read_word16(MemoryLayout::STAT_ADDR_APP_START);
        let application_length = self.space.read_word16(MemoryLayout::STAT_ADDR_APP_LEN);
        let stat_crc = self.space.read_word16(MemoryLayout::STAT_ADDR_STAT_CRC);
        let calculated_stat_crc = self
            .space
            .crc16_modbus(MemoryLayout::STAT_ADDR_START << 1, MemoryLayout::STAT_CRC_LEN)?;

        log::debug!(
            "statistics: application 0x{application_start:04x}+{application_length}, crc {stat_crc:04x}/{calculated_stat_crc:04x}"
        );

        Ok(StatisticsCheck {
            reset_command,
            application_start,
            application_length,
            stat_crc,
            calculated_stat_crc,
        })
    }

    /// Recomputes the application CRC over the range named by `stats`.
    pub fn application(&self, stats: &StatisticsCheck) -> Result<ApplicationCheck, RangeError> {
        let start = stats.application_start as u32;
        let length = stats.application_length as u32;

        if !self.space.has_range(start, length) {
            return Err(RangeError::new(start, length).with_context(RangeError::APPLICATION));
        }

        let app_crc = self.space.read_word16(MemoryLayout::STAT_ADDR_APP_CRC);
        let calculated_app_crc = self.space.crc16_modbus(start, length)?;

        log::debug!("application: crc {app_crc:04x}/{calculated_app_crc:04x}");

        Ok(ApplicationCheck {
            app_crc,
            calculated_app_crc,
        })
    }

    /// Runs both checks. A CRC mismatch never stops the other check; a
    /// missing statistics record or application range does.
    pub fn verify(&self) -> Result<VerificationReport, RangeError> {
        let statistics = self.statistics()?;
        let application = self.application(&statistics)?;
        Ok(VerificationReport {
            statistics,
            application,
        })
    }
}
